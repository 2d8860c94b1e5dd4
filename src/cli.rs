use std::ffi::OsString;

use clap::Parser;

use crate::args::ArgBag;

/// String options take an optional value: a bare `--remote` names the
/// field for `--editConfig` without supplying a value.
#[derive(Parser, Debug)]
#[command(
    name = "gfork",
    version,
    about = "Fork and clone repositories with a persisted configuration.",
    long_about = None
)]
pub struct Cli {
    /// Repositories to fork; `.` means the current directory
    pub urls: Vec<String>,
    #[arg(long = "configFile", short = 'f')]
    pub config_file: Option<String>,
    #[arg(long, short = 'u')]
    pub username: Option<Option<String>>,
    #[arg(long, short = 'p')]
    pub password: Option<String>,
    #[arg(long = "forksDir", short = 'F', visible_aliases = ["forkDir", "fd"])]
    pub forks_dir: Option<Option<String>>,
    /// Put forks in node_modules
    #[arg(long = "nm", short = 'N')]
    pub node_modules: bool,
    #[arg(long = "rmRf", short = 'R', visible_aliases = ["rmrf", "rm"])]
    pub rm_rf: bool,
    #[arg(long, short = 't')]
    pub token: Option<Option<String>>,
    #[arg(long = "tokenNote", short = 'n')]
    pub token_note: Option<Option<String>>,
    #[arg(long, short = 'r')]
    pub remote: Option<Option<String>>,
    #[arg(long, short = 'd')]
    pub domain: Option<Option<String>>,
    #[arg(long, short = 'c', visible_alias = "cmd")]
    pub command: Option<Option<String>>,
    #[arg(long = "rootDirCommand", visible_alias = "rdc")]
    pub root_dir_command: Option<Option<String>>,
    #[arg(long = "pullRequest", visible_alias = "pr")]
    pub pull_request: bool,
    #[arg(long = "editConfig", short = 'e')]
    pub edit_config: bool,
    /// Operate in the current directory
    #[arg(long)]
    pub here: bool,
}

/// `-fd` is accepted as a spelling of `--fd`.
fn normalize(arg: OsString) -> OsString {
    match arg.to_str() {
        Some("-fd") => OsString::from("--fd"),
        Some(s) if s.starts_with("-fd=") => OsString::from(format!("-{}", s)),
        _ => arg,
    }
}

impl Cli {
    pub fn parse_args() -> Self {
        Self::parse_from(std::env::args_os().map(normalize))
    }

    pub fn try_parse_args<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(args.into_iter().map(Into::into).map(normalize))
    }

    pub fn into_arg_bag(self) -> ArgBag {
        fn named(bag: ArgBag, name: &str, arg: Option<Option<String>>) -> ArgBag {
            match arg {
                Some(Some(value)) => bag.value(name, value),
                Some(None) => bag.flag(name),
                None => bag,
            }
        }
        fn flag(bag: ArgBag, name: &str, set: bool) -> ArgBag {
            if set {
                bag.flag(name)
            } else {
                bag
            }
        }

        let mut bag = ArgBag::new();
        for url in self.urls {
            bag = bag.positional(url);
        }
        bag = named(bag, "configFile", self.config_file.map(Some));
        bag = named(bag, "username", self.username);
        bag = named(bag, "password", self.password.map(Some));
        bag = named(bag, "forksDir", self.forks_dir);
        bag = named(bag, "token", self.token);
        bag = named(bag, "tokenNote", self.token_note);
        bag = named(bag, "remote", self.remote);
        bag = named(bag, "domain", self.domain);
        bag = named(bag, "command", self.command);
        bag = named(bag, "rootDirCommand", self.root_dir_command);
        bag = flag(bag, "nm", self.node_modules);
        bag = flag(bag, "rmRf", self.rm_rf);
        bag = flag(bag, "pullRequest", self.pull_request);
        bag = flag(bag, "editConfig", self.edit_config);
        flag(bag, "here", self.here)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::ArgValue;

    fn bag(args: &[&str]) -> ArgBag {
        Cli::try_parse_args(std::iter::once("gfork").chain(args.iter().copied()))
            .unwrap()
            .into_arg_bag()
    }

    #[test]
    fn aliases_land_on_canonical_names() {
        let bag = bag(&["--fd", "/forks", "--cmd", "ls", "--rdc", "code .", "--pr"]);
        assert_eq!(bag.first_value(&["forksDir"]), Some("/forks"));
        assert_eq!(bag.first_value(&["command"]), Some("ls"));
        assert_eq!(bag.first_value(&["rootDirCommand"]), Some("code ."));
        assert!(bag.any_set(&["pullRequest"]));
    }

    #[test]
    fn single_dash_fd_is_accepted() {
        let bag = bag(&["-fd", "/forks", "repo"]);
        assert_eq!(bag.first_value(&["forksDir"]), Some("/forks"));
        assert_eq!(bag.positionals(), ["repo".to_string()]);
    }

    #[test]
    fn bare_string_options_are_flags() {
        let bag = bag(&["-e", "--remote", "-F"]);
        assert_eq!(bag.get("remote"), Some(&ArgValue::Flag));
        assert_eq!(bag.get("forksDir"), Some(&ArgValue::Flag));
        assert!(bag.any_set(&["editConfig"]));
    }

    #[test]
    fn short_flags() {
        let bag = bag(&["--here", "-N", "-R", "."]);
        assert!(bag.any_set(&["here"]));
        assert!(bag.any_set(&["nm"]));
        assert!(bag.any_set(&["rmRf"]));
        assert_eq!(bag.positionals(), [".".to_string()]);
        assert!(bag.get("remote").is_none());
    }
}
