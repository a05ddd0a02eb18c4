//! Renders the bash script executed by the keystore init container.
//!
//! The script creates the keystore once and then adds one entry per file found in the secure
//! settings directory. It runs with `set -eux`, so the first failing command aborts the whole
//! script and with it the Pod startup.
use handlebars::Handlebars;
use indoc::indoc;
use serde::Serialize;
use snafu::{ResultExt, Snafu};

use crate::init_container::InitContainerParameters;

/// Script skeleton, rendered against the camelCase fields of [`InitContainerParameters`].
/// Values are inserted verbatim, without any shell escaping.
const SCRIPT_TEMPLATE: &str = indoc! {r#"
    #!/usr/bin/env bash
    set -eux
    echo "Initializing keystore."
    {{keystoreCreateCommand}}
    for filename in {{secureSettingsMountPath}}/*; do
        [[ -e "$filename" ]] || continue
        key=$(basename "$filename")
        echo "Adding "$key" to the keystore."
        {{keystoreAddCommand}}
    done
    echo "Keystore initialization successful."
"#};

type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Snafu, Debug)]
pub enum Error {
    #[snafu(display("failed to render the keystore script template"))]
    RenderTemplate { source: handlebars::RenderError },
}

/// Renders the keystore init script for the given parameters.
///
/// Only a malformed built-in template can make this fail, the parameters themselves are
/// substituted as they are.
pub fn render_script(parameters: &InitContainerParameters) -> Result<String> {
    render_template(SCRIPT_TEMPLATE, parameters)
}

fn render_template<T: Serialize>(template: &str, params: &T) -> Result<String> {
    let mut handlebars = Handlebars::new();
    handlebars.set_strict_mode(true);
    // The output is a shell script, not HTML
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .render_template(template, params)
        .context(RenderTemplateSnafu)
}
