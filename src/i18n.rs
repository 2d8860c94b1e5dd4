use std::collections::HashMap;

use anyhow::anyhow;
use fluent::{FluentArgs, FluentBundle, FluentResource};
use log::error;
use unic_langid::{langid, LanguageIdentifier};

pub struct I18N {
    lang_id: LanguageIdentifier,
    bundles: HashMap<LanguageIdentifier, FluentBundle<FluentResource>>,
}

impl I18N {
    pub fn new() -> Self {
        Self::with_lang(system_lang_id())
    }

    pub fn with_lang(lang_id: LanguageIdentifier) -> Self {
        Self {
            lang_id,
            bundles: HashMap::from_iter([(langid!("en-US"), fluent_bundle_en_us())]),
        }
    }

    pub fn lang_id(&self) -> &LanguageIdentifier {
        &self.lang_id
    }

    fn bundle(&self) -> &FluentBundle<FluentResource> {
        self.bundles
            .get(&self.lang_id)
            .unwrap_or(&self.bundles[&langid!("en-US")])
    }

    pub fn format_msg(
        &self,
        msg_id: impl AsRef<str>,
        params: Option<Vec<(String, String)>>,
    ) -> anyhow::Result<String> {
        let msg_id = msg_id.as_ref();
        let bundle = self.bundle();
        let pattern = bundle
            .get_message(msg_id)
            .and_then(|msg| msg.value())
            .ok_or_else(|| anyhow!("key missing: key: {}, lang_id: {}", msg_id, self.lang_id))?;
        let mut errs = Vec::new();
        let res = bundle.format_pattern(
            pattern,
            params.map(FluentArgs::from_iter).as_ref(),
            &mut errs,
        );
        if !errs.is_empty() {
            return Err(anyhow!("format error: {:?}", errs));
        }
        Ok(res.to_string())
    }

    pub fn format_msg_or_log(
        &self,
        msg_id: impl AsRef<str>,
        params: Option<Vec<(String, String)>>,
    ) -> String {
        let msg_id = msg_id.as_ref();
        self.format_msg(msg_id, params).unwrap_or_else(|err| {
            error!("{:?}", err);
            msg_id.to_string()
        })
    }
}

impl Default for I18N {
    fn default() -> Self {
        Self::new()
    }
}

fn system_lang_id() -> LanguageIdentifier {
    sys_locale::get_locale()
        .and_then(|locale| locale.parse().ok())
        .unwrap_or(langid!("en-US"))
}

fn fluent_bundle_en_us() -> FluentBundle<FluentResource> {
    let mut bundle = FluentBundle::new(vec![langid!("en-US")]);
    bundle.set_use_isolating(false);
    bundle
        .add_resource(
            FluentResource::try_new(include_str!("../assets/lang/en_US.ftl").to_string())
                .expect("Failed to parse an FTL string."),
        )
        .expect("Failed to add FTL resources to the bundle.");

    bundle
}
