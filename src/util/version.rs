pub const APP_NAME: &str = "Punk Shipping";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const GIT_TAG: Option<&str> = option_env!("GIT_TAG");

/// Release tag when built from a tagged checkout, package version otherwise.
pub fn version_label() -> String {
    label_for(GIT_TAG, APP_VERSION)
}

/// User agent for catalog downloads.
pub fn user_agent() -> String {
    format!("punk-shipping/{}", version_label())
}

/// Labels always carry a single leading `v`, whether or not the tag has one.
fn label_for(tag: Option<&str>, version: &str) -> String {
    let raw = tag.map(str::trim).filter(|tag| !tag.is_empty()).unwrap_or(version);
    format!("v{}", raw.trim_start_matches('v'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn labels_prefer_the_release_tag() {
        assert_eq!(label_for(Some("v2.1.0"), "0.1.0"), "v2.1.0");
        assert_eq!(label_for(Some("2.1.0"), "0.1.0"), "v2.1.0");
        assert_eq!(label_for(Some("  "), "0.1.0"), "v0.1.0");
        assert_eq!(label_for(None, "0.1.0"), "v0.1.0");
    }

    #[test]
    fn user_agent_names_the_app() {
        assert!(user_agent().starts_with("punk-shipping/v"));
        assert!(version_label().starts_with('v'));
    }
}
