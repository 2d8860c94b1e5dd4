use std::{
    collections::BTreeMap,
    io::{ErrorKind, Write},
    path::{Path, PathBuf},
};

use log::debug;
use serde_json::Value;

use crate::{
    args::ArgBag,
    error::{ConfigError, Result},
};

pub const CONFIG_FILE_NAME: &str = ".gfork";
pub const NODE_MODULES: &str = "node_modules";

const CONFIG_FILE_ALIASES: &[&str] = &["configFile", "f"];
const PASSWORD_ALIASES: &[&str] = &["password", "p"];
const HERE_ALIASES: &[&str] = &["here"];
const NODE_MODULES_ALIASES: &[&str] = &["nm", "N"];
const RM_RF_ALIASES: &[&str] = &["rmRf", "rmrf", "rm", "R"];
const PULL_REQUEST_ALIASES: &[&str] = &["pullRequest", "pr"];
const EDIT_CONFIG_ALIASES: &[&str] = &["editConfig", "e"];

/// Keys that only live for one invocation. Stripped if an older file
/// carries them.
const RUNTIME_KEYS: &[&str] = &[
    "args",
    "password",
    "configFile",
    "configFileContents",
    "configFileNotExistsFlag",
    "urls",
    "root",
    "here",
    "rmRf",
    "pullRequest",
    "editConfig",
    "loggedIn",
];

/// Persisted settings, each resolved CLI > file > default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Username,
    Token,
    TokenNote,
    Remote,
    Domain,
    ForksDir,
    Command,
    RootDirCommand,
}

pub struct FieldSpec {
    pub field: Field,
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub default: Option<&'static str>,
}

pub const FIELDS: &[FieldSpec] = &[
    FieldSpec {
        field: Field::Username,
        name: "username",
        aliases: &["username", "u"],
        default: None,
    },
    FieldSpec {
        field: Field::Token,
        name: "token",
        aliases: &["token", "t"],
        default: None,
    },
    FieldSpec {
        field: Field::TokenNote,
        name: "tokenNote",
        aliases: &["tokenNote", "n"],
        default: Some("Token for gfork"),
    },
    FieldSpec {
        field: Field::Remote,
        name: "remote",
        aliases: &["remote", "r"],
        default: Some("src"),
    },
    FieldSpec {
        field: Field::Domain,
        name: "domain",
        aliases: &["domain", "d"],
        default: Some("github.com"),
    },
    FieldSpec {
        field: Field::ForksDir,
        name: "forksDir",
        aliases: &["forksDir", "forkDir", "fd", "F"],
        default: None,
    },
    FieldSpec {
        field: Field::Command,
        name: "command",
        aliases: &["command", "cmd", "c"],
        default: None,
    },
    FieldSpec {
        field: Field::RootDirCommand,
        name: "rootDirCommand",
        aliases: &["rootDirCommand", "rdc"],
        default: None,
    },
];

impl Field {
    pub fn spec(self) -> &'static FieldSpec {
        // FIELDS is declared in variant order.
        &FIELDS[self as usize]
    }

    pub fn name(self) -> &'static str {
        self.spec().name
    }
}

/// On-disk form of the config file. Only non-empty values are written.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_note: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remote: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forks_dir: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub command: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_dir_command: Option<String>,
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PersistedConfig {
    fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Username => &self.username,
            Field::Token => &self.token,
            Field::TokenNote => &self.token_note,
            Field::Remote => &self.remote,
            Field::Domain => &self.domain,
            Field::ForksDir => &self.forks_dir,
            Field::Command => &self.command,
            Field::RootDirCommand => &self.root_dir_command,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    fn set(&mut self, field: Field, value: String) {
        let slot = match field {
            Field::Username => &mut self.username,
            Field::Token => &mut self.token,
            Field::TokenNote => &mut self.token_note,
            Field::Remote => &mut self.remote,
            Field::Domain => &mut self.domain,
            Field::ForksDir => &mut self.forks_dir,
            Field::Command => &mut self.command,
            Field::RootDirCommand => &mut self.root_dir_command,
        };
        *slot = Some(value);
    }
}

#[derive(Debug, Clone, Default)]
struct Bookkeeping {
    password: Option<String>,
    config_file_missing: bool,
    requested: Vec<Field>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub username: Option<String>,
    pub token: Option<String>,
    pub token_note: String,
    pub remote: String,
    pub domain: String,
    pub forks_dir: Option<String>,
    pub command: Option<String>,
    pub root_dir_command: Option<String>,
    pub urls: Vec<String>,
    pub here: bool,
    pub rm_rf: bool,
    pub pull_request: bool,
    pub edit_config: bool,
    pub root: PathBuf,
    pub config_file: PathBuf,
    extra: BTreeMap<String, Value>,
    internal: Bookkeeping,
}

fn home_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|dirs| dirs.home_dir().to_path_buf())
}

/// Known fields hold strings; any other value is treated as unset. A
/// boolean `forksDir` is kept aside so resolution can reject it.
struct FileContents {
    values: PersistedConfig,
    forks_dir_flag: bool,
}

impl FileContents {
    fn from_map(mut map: serde_json::Map<String, Value>) -> Self {
        let mut values = PersistedConfig::default();
        let mut forks_dir_flag = false;
        for spec in FIELDS {
            match map.remove(spec.name) {
                Some(Value::String(value)) => values.set(spec.field, value),
                Some(Value::Bool(true)) if spec.field == Field::ForksDir => forks_dir_flag = true,
                _ => {}
            }
        }
        values.extra = map.into_iter().collect();
        FileContents {
            values,
            forks_dir_flag,
        }
    }
}

fn read_config_file(path: &Path) -> Result<Option<FileContents>> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(err) if matches!(err.kind(), ErrorKind::NotFound | ErrorKind::NotADirectory) => {
            return Ok(None)
        }
        Err(source) => {
            return Err(ConfigError::Read {
                path: path.to_owned(),
                source,
            })
        }
    };
    serde_json::from_str(&contents)
        .map(|map| Some(FileContents::from_map(map)))
        .map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
}

/// Only non-empty strings and sequences survive a save.
fn is_persistable(value: &Value) -> bool {
    match value {
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

impl Config {
    pub fn resolve(args: &ArgBag) -> Result<Self> {
        let cwd = std::env::current_dir().map_err(ConfigError::WorkingDir)?;
        Self::resolve_in(args, cwd, home_dir())
    }

    /// Resolves against an explicit working directory and home directory.
    pub fn resolve_in(args: &ArgBag, cwd: PathBuf, home: Option<PathBuf>) -> Result<Self> {
        let config_file = match args.first_value(CONFIG_FILE_ALIASES) {
            Some(path) => cwd.join(path),
            None => home.ok_or(ConfigError::NoHomeDir)?.join(CONFIG_FILE_NAME),
        };

        let file = read_config_file(&config_file)?;
        let config_file_missing = file.is_none();
        debug!(
            "config file: {} (exists: {})",
            config_file.display(),
            !config_file_missing
        );
        let (mut file, file_forks_dir_flag) = match file {
            Some(contents) => (contents.values, contents.forks_dir_flag),
            None => (PersistedConfig::default(), false),
        };
        let file_password = file
            .extra
            .get("password")
            .and_then(Value::as_str)
            .filter(|v| !v.is_empty())
            .map(str::to_owned);
        for key in RUNTIME_KEYS {
            file.extra.remove(*key);
        }

        let pick = |field: Field| -> Option<String> {
            let spec = field.spec();
            args.first_value(spec.aliases)
                .or_else(|| file.get(field))
                .or(spec.default)
                .map(str::to_owned)
        };

        let positionals = args.positionals();
        let here = args.any_set(HERE_ALIASES) || positionals.iter().any(|p| p == ".");

        let forks_aliases = Field::ForksDir.spec().aliases;
        if args.first_is_bare(forks_aliases)
            || (file_forks_dir_flag && args.first_value(forks_aliases).is_none())
        {
            return Err(ConfigError::InvalidFieldValue {
                field: Field::ForksDir.name(),
            });
        }
        let mut forks_dir = pick(Field::ForksDir);
        if here {
            forks_dir = None;
        }
        if args.any_set(NODE_MODULES_ALIASES) {
            forks_dir = Some(NODE_MODULES.to_string());
        }

        let mut urls: Vec<String> = positionals
            .iter()
            .filter(|p| p.as_str() != ".")
            .cloned()
            .collect();
        if here && urls.len() > 1 {
            return Err(ConfigError::ConflictingOptions(
                "Can't clone multiple repos in the same dir.".to_string(),
            ));
        }
        if here && urls.is_empty() {
            let base = cwd
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default();
            urls.push(base);
        }

        let requested = FIELDS
            .iter()
            .filter(|spec| args.is_passed(spec.aliases))
            .map(|spec| spec.field)
            .filter(|field| !(here && *field == Field::ForksDir && forks_dir.is_none()))
            .collect();

        Ok(Config {
            username: pick(Field::Username),
            token: pick(Field::Token),
            token_note: pick(Field::TokenNote).unwrap_or_default(),
            remote: pick(Field::Remote).unwrap_or_default(),
            domain: pick(Field::Domain).unwrap_or_default(),
            forks_dir,
            command: pick(Field::Command),
            root_dir_command: pick(Field::RootDirCommand),
            urls,
            here,
            rm_rf: args.any_set(RM_RF_ALIASES),
            pull_request: args.any_set(PULL_REQUEST_ALIASES),
            edit_config: args.any_set(EDIT_CONFIG_ALIASES),
            root: cwd,
            config_file,
            extra: file.extra.clone(),
            internal: Bookkeeping {
                password: args
                    .first_value(PASSWORD_ALIASES)
                    .map(str::to_owned)
                    .or(file_password),
                config_file_missing,
                requested,
            },
        })
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        let value = match field {
            Field::Username => self.username.as_deref(),
            Field::Token => self.token.as_deref(),
            Field::TokenNote => Some(self.token_note.as_str()),
            Field::Remote => Some(self.remote.as_str()),
            Field::Domain => Some(self.domain.as_str()),
            Field::ForksDir => self.forks_dir.as_deref(),
            Field::Command => self.command.as_deref(),
            Field::RootDirCommand => self.root_dir_command.as_deref(),
        };
        value.filter(|v| !v.is_empty())
    }

    pub fn set(&mut self, field: Field, value: String) {
        let optional = Some(value.clone()).filter(|v| !v.is_empty());
        match field {
            Field::Username => self.username = optional,
            Field::Token => self.token = optional,
            Field::TokenNote => self.token_note = value,
            Field::Remote => self.remote = value,
            Field::Domain => self.domain = value,
            Field::ForksDir => self.forks_dir = optional,
            Field::Command => self.command = optional,
            Field::RootDirCommand => self.root_dir_command = optional,
        }
    }

    pub fn password(&self) -> Option<&str> {
        self.internal.password.as_deref()
    }

    /// True when no config file existed at resolve time.
    pub fn config_file_missing(&self) -> bool {
        self.internal.config_file_missing
    }

    /// Persisted fields named on the command line, in table order.
    pub fn requested_fields(&self) -> &[Field] {
        &self.internal.requested
    }

    pub fn persisted(&self) -> PersistedConfig {
        let value = |field| self.get(field).map(str::to_owned);
        PersistedConfig {
            username: value(Field::Username),
            token: value(Field::Token),
            token_note: value(Field::TokenNote),
            remote: value(Field::Remote),
            domain: value(Field::Domain),
            forks_dir: value(Field::ForksDir),
            command: value(Field::Command),
            root_dir_command: value(Field::RootDirCommand),
            extra: self
                .extra
                .iter()
                .filter(|(_, v)| is_persistable(v))
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        }
    }

    fn prune(&mut self) {
        for spec in FIELDS {
            if self.get(spec.field).is_none() {
                self.set(spec.field, String::new());
            }
        }
        self.extra.retain(|_, v| is_persistable(v));
    }

    pub async fn save_to_file(&mut self, silent: bool) -> Result<&mut Self> {
        let mut stdout = std::io::stdout();
        self.save_reporting((!silent).then_some(&mut stdout)).await
    }

    async fn save_reporting<W: Write>(&mut self, out: Option<&mut W>) -> Result<&mut Self> {
        self.prune();
        let path = self.config_file.clone();
        let persist_err = |source| ConfigError::Persist {
            path: path.clone(),
            source,
        };
        let contents = serde_json::to_string_pretty(&self.persisted())
            .map_err(|err| persist_err(std::io::Error::new(ErrorKind::InvalidData, err)))?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(persist_err)?;
        }
        tokio::fs::write(&path, contents.as_bytes())
            .await
            .map_err(persist_err)?;
        if let Some(out) = out {
            writeln!(out, "Config saved successfully to file \"{}\"", path.display())
                .map_err(persist_err)?;
        }
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    struct Env {
        _dir: TempDir,
        home: PathBuf,
        cwd: PathBuf,
    }

    impl Env {
        fn new() -> Self {
            let dir = TempDir::new().unwrap();
            let home = dir.path().join("home");
            let cwd = dir.path().join("work").join("my-repo");
            std::fs::create_dir_all(&home).unwrap();
            std::fs::create_dir_all(&cwd).unwrap();
            Env {
                _dir: dir,
                home,
                cwd,
            }
        }

        fn with_file(contents: &str) -> Self {
            let env = Self::new();
            std::fs::write(env.home.join(CONFIG_FILE_NAME), contents).unwrap();
            env
        }

        fn resolve(&self, args: &ArgBag) -> Result<Config> {
            Config::resolve_in(args, self.cwd.clone(), Some(self.home.clone()))
        }
    }

    #[test]
    fn field_table_matches_variants() {
        for spec in FIELDS {
            assert_eq!(spec.field.name(), spec.name);
            assert_eq!(spec.aliases[0], spec.name);
        }
    }

    #[test]
    fn defaults_apply_on_first_run() {
        let env = Env::new();
        let config = env.resolve(&ArgBag::new()).unwrap();
        assert!(config.config_file_missing());
        assert_eq!(config.remote, "src");
        assert_eq!(config.domain, "github.com");
        assert_eq!(config.token_note, "Token for gfork");
        assert_eq!(config.token, None);
        assert_eq!(config.forks_dir, None);
        assert_eq!(config.config_file, env.home.join(".gfork"));
        assert_eq!(config.root, env.cwd);
    }

    #[test]
    fn file_value_beats_default_and_cli_beats_file() {
        let env = Env::with_file(r#"{"remote":"foo"}"#);
        let config = env.resolve(&ArgBag::new()).unwrap();
        assert_eq!(config.remote, "foo");
        assert!(!config.config_file_missing());

        let config = env.resolve(&ArgBag::new().value("remote", "bar")).unwrap();
        assert_eq!(config.remote, "bar");

        let config = env.resolve(&ArgBag::new().value("r", "baz")).unwrap();
        assert_eq!(config.remote, "baz");
    }

    #[test]
    fn precedence_is_per_field() {
        let env = Env::with_file(r#"{"domain":"git.example.com","command":"npm i"}"#);
        let args = ArgBag::new().value("cmd", "make").value("tokenNote", "ci");
        let config = env.resolve(&args).unwrap();
        assert_eq!(config.domain, "git.example.com");
        assert_eq!(config.command.as_deref(), Some("make"));
        assert_eq!(config.token_note, "ci");
        assert_eq!(config.remote, "src");
    }

    #[test]
    fn empty_file_values_fall_back_to_defaults() {
        let env = Env::with_file(r#"{"remote":""}"#);
        let config = env.resolve(&ArgBag::new()).unwrap();
        assert_eq!(config.remote, "src");
    }

    #[test]
    fn scenario_remote_from_file_with_one_url() {
        let env = Env::with_file(r#"{"remote":"upstream"}"#);
        let config = env.resolve(&ArgBag::new().positional("repo-url")).unwrap();
        assert_eq!(config.remote, "upstream");
        assert_eq!(config.domain, "github.com");
        assert_eq!(config.urls, vec!["repo-url".to_string()]);
        assert_eq!(config.forks_dir, None);
        assert!(!config.here);
    }

    #[test]
    fn here_clears_forks_dir_from_file() {
        let env = Env::with_file(r#"{"forksDir":"/src/forks"}"#);
        let config = env.resolve(&ArgBag::new().flag("here")).unwrap();
        assert!(config.here);
        assert_eq!(config.forks_dir, None);

        let config = env
            .resolve(&ArgBag::new().value("fd", "/tmp/x").positional("."))
            .unwrap();
        assert!(config.here);
        assert_eq!(config.forks_dir, None);
    }

    #[test]
    fn here_with_two_urls_conflicts() {
        let env = Env::new();
        let args = ArgBag::new().flag("here").positional("a").positional("b");
        let err = env.resolve(&args).unwrap_err();
        assert!(matches!(err, ConfigError::ConflictingOptions(_)));
    }

    #[test]
    fn here_without_urls_uses_cwd_basename() {
        let env = Env::new();
        let config = env.resolve(&ArgBag::new().flag("here")).unwrap();
        assert_eq!(config.urls, vec!["my-repo".to_string()]);
    }

    #[test]
    fn scenario_here_with_node_modules() {
        let env = Env::new();
        let args = ArgBag::new().flag("here").flag("nm").positional(".");
        let config = env.resolve(&args).unwrap();
        assert!(config.here);
        assert_eq!(config.forks_dir.as_deref(), Some("node_modules"));
        assert_eq!(config.urls, vec!["my-repo".to_string()]);
    }

    #[test]
    fn dot_positional_is_stripped() {
        let env = Env::new();
        let config = env
            .resolve(&ArgBag::new().positional(".").positional("repo"))
            .unwrap();
        assert!(config.here);
        assert_eq!(config.urls, vec!["repo".to_string()]);
    }

    #[test]
    fn bare_forks_dir_is_rejected() {
        let env = Env::new();
        let err = env.resolve(&ArgBag::new().flag("F")).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidFieldValue { field: "forksDir" }
        ));
    }

    #[test]
    fn forks_dir_aliases_in_order() {
        let env = Env::new();
        let args = ArgBag::new().value("F", "last").value("forkDir", "second");
        let config = env.resolve(&args).unwrap();
        assert_eq!(config.forks_dir.as_deref(), Some("second"));
    }

    #[test]
    fn malformed_json_is_fatal() {
        let env = Env::with_file("{ remote: ");
        let err = env.resolve(&ArgBag::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert!(err.to_string().contains(".gfork"));
    }

    #[test]
    fn explicit_config_file_is_relative_to_cwd() {
        let env = Env::new();
        std::fs::write(env.cwd.join("alt.json"), r#"{"domain":"gitlab.com"}"#).unwrap();
        let config = env
            .resolve(&ArgBag::new().value("f", "alt.json"))
            .unwrap();
        assert_eq!(config.config_file, env.cwd.join("alt.json"));
        assert_eq!(config.domain, "gitlab.com");
    }

    #[test]
    fn runtime_flags_and_password() {
        let env = Env::with_file(r#"{"password":"hunter2","here":true}"#);
        let args = ArgBag::new().flag("R").flag("pr").flag("e");
        let config = env.resolve(&args).unwrap();
        assert!(config.rm_rf);
        assert!(config.pull_request);
        assert!(config.edit_config);
        assert!(!config.here);
        assert_eq!(config.password(), Some("hunter2"));
        assert!(config.persisted().extra.is_empty());
    }

    #[test]
    fn requested_fields_follow_aliases() {
        let env = Env::new();
        let args = ArgBag::new().flag("e").flag("r").value("cmd", "ls");
        let config = env.resolve(&args).unwrap();
        assert_eq!(config.requested_fields(), &[Field::Remote, Field::Command]);
    }

    #[tokio::test]
    async fn save_omits_empty_values() {
        let env = Env::new();
        let mut config = env.resolve(&ArgBag::new().flag("here")).unwrap();
        config.set(Field::Command, String::new());
        config.set(Field::TokenNote, String::new());
        config.save_to_file(true).await.unwrap();

        let written = std::fs::read_to_string(env.home.join(".gfork")).unwrap();
        let value: Value = serde_json::from_str(&written).unwrap();
        let keys: Vec<&str> = value
            .as_object()
            .unwrap()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(keys.len(), 2);
        assert!(keys.contains(&"remote"));
        assert!(keys.contains(&"domain"));
        assert!(written.contains("\n  \"remote\": \"src\""));
    }

    #[tokio::test]
    async fn saved_file_round_trips() {
        let env = Env::with_file(r#"{"alias":"x","count":3,"tags":[]}"#);
        let args = ArgBag::new()
            .value("forksDir", "/forks")
            .value("token", "abc")
            .value("rdc", "code .")
            .value("c", "npm i");
        let mut config = env.resolve(&args).unwrap();
        let saved = config.save_to_file(true).await.unwrap().persisted();
        assert!(!saved.extra.contains_key("count"));
        assert!(!saved.extra.contains_key("tags"));

        let reloaded = env.resolve(&ArgBag::new()).unwrap();
        assert_eq!(reloaded.persisted(), saved);
        assert_eq!(reloaded.forks_dir.as_deref(), Some("/forks"));
        assert_eq!(reloaded.extra.get("alias"), Some(&Value::from("x")));
    }

    #[tokio::test]
    async fn save_creates_parent_dirs() {
        let env = Env::new();
        let args = ArgBag::new().value("configFile", "nested/dir/gfork.json");
        let mut config = env.resolve(&args).unwrap();
        config.save_to_file(true).await.unwrap();
        assert!(env.cwd.join("nested/dir/gfork.json").is_file());
    }

    #[tokio::test]
    async fn save_failure_names_path() {
        let env = Env::new();
        std::fs::write(env.cwd.join("blocker"), "").unwrap();
        let args = ArgBag::new().value("configFile", "blocker/gfork.json");
        let mut config = env.resolve(&args).unwrap();
        assert!(config.config_file_missing());
        let err = config.save_to_file(true).await.unwrap_err();
        assert!(matches!(err, ConfigError::Persist { .. }));
        assert!(err.to_string().contains("blocker"));
    }

    #[tokio::test]
    async fn save_reports_path_unless_silent() {
        let env = Env::new();
        let mut config = env.resolve(&ArgBag::new()).unwrap();
        let mut out = Vec::new();
        config.save_reporting(Some(&mut out)).await.unwrap();
        let line = String::from_utf8(out).unwrap();
        assert_eq!(
            line,
            format!(
                "Config saved successfully to file \"{}\"\n",
                env.home.join(".gfork").display()
            )
        );

        config.save_reporting(None::<&mut Vec<u8>>).await.unwrap();
        assert!(env.home.join(".gfork").is_file());
    }

    #[test]
    fn unreadable_config_file_is_fatal() {
        let env = Env::new();
        std::fs::create_dir_all(env.cwd.join("confdir")).unwrap();
        let err = env
            .resolve(&ArgBag::new().value("configFile", "confdir"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("confdir"));
    }

    #[test]
    fn non_string_file_values_are_ignored() {
        let env = Env::with_file(r#"{"remote":5,"token":false,"domain":"gitlab.com","forksDir":null}"#);
        let config = env.resolve(&ArgBag::new()).unwrap();
        assert_eq!(config.remote, "src");
        assert_eq!(config.token, None);
        assert_eq!(config.forks_dir, None);
        assert_eq!(config.domain, "gitlab.com");
        assert!(config.persisted().extra.is_empty());
    }

    #[test]
    fn boolean_forks_dir_in_file_is_rejected() {
        let env = Env::with_file(r#"{"forksDir":true}"#);
        let err = env.resolve(&ArgBag::new()).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidFieldValue { field: "forksDir" }
        ));

        let config = env.resolve(&ArgBag::new().value("fd", "/forks")).unwrap();
        assert_eq!(config.forks_dir.as_deref(), Some("/forks"));
    }

    #[test]
    fn non_object_json_is_a_parse_error() {
        let env = Env::with_file("[1, 2]");
        let err = env.resolve(&ArgBag::new()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn here_drops_forks_dir_from_requested_fields() {
        let env = Env::new();
        let args = ArgBag::new().flag("here").flag("e").value("forksDir", "/x");
        let config = env.resolve(&args).unwrap();
        assert_eq!(config.forks_dir, None);
        assert!(config.requested_fields().is_empty());

        let args = ArgBag::new()
            .flag("here")
            .flag("e")
            .flag("nm")
            .value("forksDir", "/x");
        let config = env.resolve(&args).unwrap();
        assert_eq!(config.requested_fields(), &[Field::ForksDir]);
    }
}
