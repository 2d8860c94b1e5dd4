use log::{debug, info};

use crate::{
    cli::Cli,
    config::Config,
    editor::Editor,
    i18n::I18N,
    prompt::TerminalPrompt,
};

pub struct Gfork {
    config: Config,
    i18n: I18N,
}

impl Gfork {
    pub fn parse() -> anyhow::Result<Self> {
        let args = Cli::parse_args().into_arg_bag();
        let config = Config::resolve(&args)?;
        let i18n = I18N::new();
        debug!("locale: {}", i18n.lang_id());
        Ok(Gfork { config, i18n })
    }

    fn path_param(&self) -> Vec<(String, String)> {
        vec![(
            "path".to_string(),
            self.config.config_file.to_string_lossy().to_string(),
        )]
    }

    pub async fn run(&mut self) -> anyhow::Result<()> {
        let first_run = self.config.config_file_missing();
        if first_run {
            println!(
                "{}",
                self.i18n
                    .format_msg_or_log("run-first", Some(self.path_param()))
            );
        }
        if first_run || self.config.edit_config {
            let prompt = TerminalPrompt::new();
            let mode = Editor::new(&prompt, &self.i18n)
                .edit(&mut self.config)
                .await?;
            info!("config edited: {:?}", mode);
            if self.config.urls.is_empty() {
                return Ok(());
            }
        }

        if self.config.urls.is_empty() {
            println!("{}", self.i18n.format_msg_or_log("run-nothing", None));
            return Ok(());
        }

        let dir = match (&self.config.forks_dir, self.config.here) {
            (Some(forks_dir), false) => self.config.root.join(forks_dir),
            _ => self.config.root.clone(),
        };
        info!(
            "remote: {}, domain: {}, rmRf: {}, pullRequest: {}, password: {}",
            self.config.remote,
            self.config.domain,
            self.config.rm_rf,
            self.config.pull_request,
            self.config.password().is_some()
        );
        for url in &self.config.urls {
            println!(
                "{}",
                self.i18n.format_msg_or_log(
                    "run-target",
                    Some(vec![
                        ("url".to_string(), url.to_owned()),
                        ("dir".to_string(), dir.to_string_lossy().to_string()),
                    ]),
                )
            );
        }
        Ok(())
    }
}
