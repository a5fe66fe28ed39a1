use anyhow::Result;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use std::process::Command;
use tempfile::TempDir;

const CATALOG: &str = r#"
foods:
  - name: Spaghetti
    category: grain
    default_unit: g
recipes:
  - title: Spaghetti Aglio e Olio
    preparation_minutes: 5
    cooking_minutes: 10
    servings: 2
    vegetarian: true
    ingredients:
      - food: Spaghetti
        quantity: "200 g"
      - food: Garlic
        quantity: "3 clove"
      - food: Chili
        quantity: "1"
        optional: true
    instructions:
      - Boil the pasta
      - Fry garlic and chili in oil
  - title: Garlic Bread
    ingredients:
      - food: Bread
        quantity: "4 slice"
      - food: Garlic
        quantity: "2 clove"
      - food: Butter
        quantity: "50 g"
      - food: Parsley
        quantity: to taste
"#;

/// A throwaway data directory driven through the real binary.
struct LarderTestEnv {
    _tmp: TempDir,
    root: PathBuf,
}

impl LarderTestEnv {
    fn new() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let root = tmp.path().to_path_buf();
        Ok(Self { _tmp: tmp, root })
    }

    fn larder(&self) -> Command {
        let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("larder"));
        cmd.arg("--data-dir")
            .arg(&self.root)
            .env_remove("LARDER_DB_PATH")
            .env_remove("LARDER_MAX_MISSING")
            .env_remove("LARDER_DATA_DIR");
        cmd
    }

    fn with_catalog(self) -> Result<Self> {
        self.larder().arg("init").assert().success();
        let catalog = self.root.join("catalog.yaml");
        fs::write(&catalog, CATALOG)?;
        self.larder().arg("import").arg(&catalog).assert().success();
        Ok(self)
    }
}

#[test]
fn test_init_creates_config_and_database() -> Result<()> {
    let env = LarderTestEnv::new()?;

    env.larder()
        .arg("init")
        .assert()
        .success()
        .stdout(predicate::str::contains("Database ready"));

    assert!(env.root.join("larder.yaml").exists());
    assert!(env.root.join("larder.duckdb").exists());

    // Idempotent
    env.larder().arg("init").assert().success();
    Ok(())
}

#[test]
fn test_stock_add_list_and_expiring() -> Result<()> {
    let env = LarderTestEnv::new()?;
    env.larder().arg("init").assert().success();

    env.larder()
        .args(["stock", "add", "fridge", "Milk", "1500 ml", "--expiry", "2026-10-16", "--create"])
        .assert()
        .success()
        .stdout(predicate::str::contains("card #"));
    env.larder()
        .args(["stock", "add", "fridge", "Honey", "1 pack"])
        .assert()
        .success();

    env.larder()
        .args(["stock", "list", "fridge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milk"))
        .stdout(predicate::str::contains("1.5 l"))
        .stdout(predicate::str::contains("Honey"));

    env.larder()
        .args(["stock", "expiring", "--days", "3", "--today", "2026-10-14"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Milk"))
        .stdout(predicate::str::contains("Honey").not());
    Ok(())
}

#[test]
fn test_unknown_stock_fails_with_diagnostic() -> Result<()> {
    let env = LarderTestEnv::new()?;
    env.larder().arg("init").assert().success();

    env.larder()
        .args(["stock", "list", "nowhere"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Stock 'nowhere' not found"));
    Ok(())
}

#[test]
fn test_bad_quantity_is_rejected() -> Result<()> {
    let env = LarderTestEnv::new()?;
    env.larder().arg("init").assert().success();

    env.larder()
        .args(["stock", "add", "fridge", "Milk", "a splash", "--create"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid quantity"));
    Ok(())
}

#[test]
fn test_match_ranks_and_writes_report() -> Result<()> {
    let env = LarderTestEnv::new()?.with_catalog()?;
    env.larder()
        .args(["stock", "add", "pantry", "Spaghetti", "500 g", "--create"])
        .assert()
        .success();
    env.larder()
        .args(["stock", "add", "pantry", "Garlic", "1 bunch"])
        .assert()
        .success();
    env.larder()
        .args(["stock", "add", "pantry", "garlic", "6 clove"])
        .assert()
        .success();

    let report = env.root.join("matches.json");
    env.larder()
        .args(["match", "--out"])
        .arg(&report)
        .assert()
        .success()
        .stdout(predicate::str::contains("Spaghetti Aglio e Olio"))
        .stdout(predicate::str::contains("Garlic Bread"));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&report)?)?;
    let matches = json.as_array().map(Vec::len);
    assert_eq!(matches, Some(2));
    assert_eq!(json[0]["recipe"]["title"], "Spaghetti Aglio e Olio");
    assert_eq!(json[0]["satisfied"], 2);

    // Zero tolerance: the optional chili still blocks unless ignored.
    env.larder()
        .args(["match", "--max-missing", "0"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipe within 0 missing ingredients"));
    env.larder()
        .args(["match", "--max-missing", "0", "--ignore-optional"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Spaghetti Aglio e Olio"));
    Ok(())
}

#[test]
fn test_search_fuzzy_titles() -> Result<()> {
    let env = LarderTestEnv::new()?.with_catalog()?;

    env.larder()
        .args(["search", "garlic bred"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Garlic Bread"));

    env.larder()
        .args(["search", "   "])
        .assert()
        .success()
        .stdout(predicate::str::contains("No recipe matches"));
    Ok(())
}

#[test]
fn test_routine_restocks_when_due() -> Result<()> {
    let env = LarderTestEnv::new()?;
    env.larder().arg("init").assert().success();
    env.larder()
        .args(["stock", "add", "fridge", "Butter", "250 g", "--create"])
        .assert()
        .success();

    env.larder()
        .args([
            "routine", "add", "weekly eggs", "--stock", "fridge", "--schedule", "weekly:mon",
            "--start", "2026-10-01",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Routine #"));
    env.larder()
        .args(["routine", "item", "1", "Eggs", "6"])
        .assert()
        .success();

    env.larder()
        .args(["routine", "run", "--today", "2026-10-12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("weekly eggs"))
        .stdout(predicate::str::contains("1 cards restocked"));

    env.larder()
        .args(["routine", "run", "--today", "2026-10-13"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No routine due"));

    env.larder()
        .args(["stock", "list", "fridge"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Eggs"));
    Ok(())
}

#[test]
fn test_sync_from_feed() -> Result<()> {
    let env = LarderTestEnv::new()?;
    env.larder().arg("init").assert().success();

    let feed = env.root.join("feed.json");
    fs::write(
        &feed,
        r#"{"foods": [
            {"id": 10, "name": "Leek", "category": "vegetable", "default_unit": "piece"},
            {"id": 11, "name": "Saffron", "category": "luxury", "default_unit": "g"},
            {"name": "missing id"}
        ]}"#,
    )?;

    env.larder()
        .arg("sync")
        .arg(&feed)
        .assert()
        .success()
        .stdout(predicate::str::contains("Synced 2 foods"))
        .stdout(predicate::str::contains("1 unrecognised"));

    env.larder()
        .arg("sync")
        .arg(env.root.join("absent.json"))
        .args(["--retries", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Remote source unavailable"));

    env.larder()
        .args(["search", "leek", "--foods"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Leek"))
        .stdout(predicate::str::contains("vegetable"))
        .stdout(predicate::str::contains("Saffron").not());
    Ok(())
}
