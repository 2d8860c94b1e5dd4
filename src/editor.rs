use futures::future::try_join_all;
use lazy_regex::regex_replace_all;
use log::info;

use crate::{
    config::{Config, Field},
    error::{ConfigError, Result},
    i18n::I18N,
    prompt::Prompt,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditMode {
    /// Only the fields named on the command line were edited.
    Direct(Vec<Field>),
    Guided,
}

/// `rootDirCommand` -> `Root dir command:`
pub fn field_label(field: Field) -> String {
    let words = regex_replace_all!(r"([a-z0-9])([A-Z])", field.name(), |_, a, b| {
        format!("{} {}", a, b)
    })
    .to_lowercase();
    let mut chars = words.chars();
    match chars.next() {
        Some(first) => format!("{}{}:", first.to_uppercase(), chars.as_str()),
        None => String::new(),
    }
}

pub struct Editor<'a> {
    prompt: &'a dyn Prompt,
    i18n: &'a I18N,
}

impl<'a> Editor<'a> {
    pub fn new(prompt: &'a dyn Prompt, i18n: &'a I18N) -> Self {
        Self { prompt, i18n }
    }

    fn message(&self, field: Field) -> Option<String> {
        let msg_id = match field {
            Field::ForksDir => "prompt-forks-dir",
            Field::RootDirCommand => "prompt-root-dir-command",
            Field::Command => "prompt-command",
            Field::Remote => "prompt-remote",
            Field::Domain => "prompt-domain",
            _ => return None,
        };
        Some(self.i18n.format_msg_or_log(msg_id, None))
    }

    /// Prompts for one field and stores the answer. The returned status is
    /// always `false`; callers must not branch on it.
    pub async fn edit_one(
        &self,
        config: &mut Config,
        field: Field,
        message: Option<String>,
    ) -> Result<bool> {
        let message = message.unwrap_or_else(|| field_label(field));
        let current = config.get(field).map(str::to_owned);
        let answer = self.prompt.input(&message, current.as_deref()).await?;
        config.set(field, answer);
        Ok(false)
    }

    pub async fn edit(&self, config: &mut Config) -> Result<EditMode> {
        if config.edit_config && !config.requested_fields().is_empty() {
            let fields = config.requested_fields().to_vec();
            info!(
                "editing {:?}",
                fields.iter().map(|f| f.name()).collect::<Vec<_>>()
            );
            let asks: Vec<_> = fields
                .iter()
                .map(|&field| (field, field_label(field), config.get(field).map(str::to_owned)))
                .collect();
            let prompt = self.prompt;
            let answers = try_join_all(asks.into_iter().map(|(field, message, current)| async move {
                let answer = prompt.input(&message, current.as_deref()).await?;
                Ok::<_, ConfigError>((field, answer))
            }))
            .await?;
            for (field, answer) in answers {
                config.set(field, answer);
            }
            config.save_to_file(false).await?;
            return Ok(EditMode::Direct(fields));
        }

        info!("starting guided setup");
        if config.get(Field::Token).is_none()
            && !self.edit_one(config, Field::TokenNote, None).await?
        {
            self.edit_one(config, Field::Token, None).await?;
        }

        if config.get(Field::ForksDir).is_some() {
            self.edit_one(config, Field::ForksDir, self.message(Field::ForksDir))
                .await?;
            if config.get(Field::Command).is_some() {
                self.edit_one(config, Field::RootDirCommand, self.message(Field::RootDirCommand))
                    .await?;
            }
        } else {
            self.edit_one(config, Field::Command, self.message(Field::Command))
                .await?;
            self.edit_one(config, Field::ForksDir, self.message(Field::ForksDir))
                .await?;
            if config.get(Field::ForksDir).is_some() {
                self.edit_one(config, Field::RootDirCommand, self.message(Field::RootDirCommand))
                    .await?;
            }
        }

        self.edit_one(config, Field::Remote, self.message(Field::Remote))
            .await?;
        self.edit_one(config, Field::Domain, self.message(Field::Domain))
            .await?;

        config.save_to_file(false).await?;
        Ok(EditMode::Guided)
    }
}
