//! `style` - compose a style document and print it as JSON.

use crate::error::CliError;
use vectorview::config::ViewerConfig;
use vectorview::style::{ComposeRequest, SpriteMode, StyleComposer, Theme};

/// Compose a style for the given theme/language/source and print it.
pub fn run(
    config: &ViewerConfig,
    theme: &str,
    language: &str,
    source: Option<&str>,
    local_sprites: bool,
) -> Result<(), CliError> {
    let Some(theme) = Theme::named(theme) else {
        let known: Vec<_> = Theme::all().iter().map(|t| t.name()).collect();
        return Err(CliError::Usage(format!(
            "unknown theme '{}' (known: {})",
            theme,
            known.join(", ")
        )));
    };

    let composer = StyleComposer::new(config.assets_base.clone());
    let document = composer.compose(ComposeRequest {
        theme: Some(theme),
        language,
        source_ref: source,
        sprite_mode: if local_sprites {
            SpriteMode::Local
        } else {
            SpriteMode::Remote
        },
        override_layers: None,
    });

    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}
