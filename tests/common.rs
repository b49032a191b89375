#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// One desk under test: its own config home and local session DB.
pub struct TestDesk {
    pub home: PathBuf,
    pub db: String,
}

impl TestDesk {
    /// Fresh home inside the system temp dir; any previous run is wiped.
    pub fn new(name: &str) -> Self {
        let mut home: PathBuf = env::temp_dir();
        home.push(format!("{}_rguestdesk", name));
        fs::remove_dir_all(&home).ok();
        fs::create_dir_all(&home).expect("create test home");

        let db = home.join("desk.sqlite").to_string_lossy().to_string();
        Self { home, db }
    }

    pub fn cmd(&self) -> Command {
        let mut cmd = cargo_bin_cmd!("rguestdesk");
        cmd.env("RGUESTDESK_HOME", &self.home)
            .args(["--db", &self.db]);
        cmd
    }

    pub fn config_file(&self) -> PathBuf {
        self.home.join("rguestdesk.conf")
    }

    /// `init`, then override config keys (values are YAML scalars).
    pub fn init_with(&self, overrides: &[(&str, &str)]) {
        self.cmd().arg("init").assert().success();

        let path = self.config_file();
        let content = fs::read_to_string(&path).expect("read config");
        let mut map: serde_yaml::Mapping = serde_yaml::from_str(&content).expect("parse config");
        for (k, v) in overrides {
            let value: serde_yaml::Value = serde_yaml::from_str(v).expect("yaml value");
            map.insert(serde_yaml::Value::String(k.to_string()), value);
        }
        fs::write(&path, serde_yaml::to_string(&map).expect("dump config")).expect("write config");
    }

    pub fn init(&self) {
        self.init_with(&[]);
    }

    /// `init` with the sheet switched off.
    pub fn init_offline(&self) {
        self.init_with(&[("store_kind", "off")]);
    }

    /// `init` sharing the sheet at `sheet` with other desks.
    pub fn init_shared(&self, kind: &str, sheet: &Path) {
        let sheet = sheet.to_string_lossy().to_string();
        self.init_with(&[("store_kind", kind), ("store_path", &sheet)]);
    }

    pub fn add(&self, args: &[&str]) {
        self.cmd().arg("add").args(args).assert().success();
    }

    pub fn start(&self, event: &str, capacity: &str) {
        self.cmd()
            .args(["start", event, "--capacity", capacity])
            .assert()
            .success();
    }
}

/// Temporary output file path inside the temp dir, removed if present.
pub fn temp_out(name: &str, ext: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rguestdesk_out.{}", name, ext));
    let p = path.to_string_lossy().to_string();
    fs::remove_file(&p).ok();
    p
}
