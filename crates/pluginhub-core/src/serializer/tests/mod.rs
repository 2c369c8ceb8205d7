
#[cfg(test)]
pub(crate) mod mocks {
    use serde_json::{Map, Value};

    use crate::kernel::error::{Error, Result};
    use crate::plugin_system::config_field::RawConfigField;
    use crate::plugin_system::context::{Project, User};
    use crate::plugin_system::error::PluginSystemError;
    use crate::plugin_system::traits::{
        CustomContext, FeatureDescription, Plugin, PluginType, ReleaseDocRenderer, Testable,
    };

    /// How the mock answers release doc requests
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub enum DocBehavior {
        Unsupported,
        Renders,
        NotImplemented,
        Fails,
    }

    /// Plugin whose every trait answer is set by the test
    #[derive(Debug, Clone)]
    pub struct MockPlugin {
        pub slug: String,
        pub title: String,
        pub hidden: bool,
        pub project_default_enabled: bool,
        pub can_disable: bool,
        pub version: Option<String>,
        pub author: Option<String>,
        pub author_url: Option<String>,
        pub description: Option<String>,
        pub assets: Vec<String>,
        pub resource_links: Vec<(String, String)>,
        pub features: Vec<FeatureDescription>,
        pub flag_prefix: Option<String>,
        pub config: Vec<RawConfigField>,
        pub additional_config: Vec<RawConfigField>,
        pub doc: DocBehavior,
        pub testable: bool,
        pub contexts: Option<Vec<String>>,
    }

    impl MockPlugin {
        pub fn new(slug: &str, title: &str) -> Self {
            Self {
                slug: slug.to_string(),
                title: title.to_string(),
                hidden: false,
                project_default_enabled: false,
                can_disable: true,
                version: None,
                author: None,
                author_url: None,
                description: None,
                assets: Vec::new(),
                resource_links: Vec::new(),
                features: Vec::new(),
                flag_prefix: None,
                config: Vec::new(),
                additional_config: Vec::new(),
                doc: DocBehavior::Unsupported,
                testable: false,
                contexts: None,
            }
        }
    }

    impl Plugin for MockPlugin {
        fn slug(&self) -> &str {
            &self.slug
        }

        fn title(&self) -> &str {
            &self.title
        }

        fn plugin_type(&self) -> PluginType {
            PluginType::Release
        }

        fn can_disable(&self) -> bool {
            self.can_disable
        }

        fn project_default_enabled(&self) -> bool {
            self.project_default_enabled
        }

        fn is_hidden(&self) -> bool {
            self.hidden
        }

        fn metadata(&self) -> Map<String, Value> {
            let mut metadata = Map::new();
            metadata.insert("source".to_string(), Value::String("mock".to_string()));
            metadata
        }

        fn assets(&self) -> Vec<String> {
            self.assets.clone()
        }

        fn version(&self) -> Option<&str> {
            self.version.as_deref()
        }

        fn author(&self) -> Option<&str> {
            self.author.as_deref()
        }

        fn author_url(&self) -> Option<&str> {
            self.author_url.as_deref()
        }

        fn description(&self) -> Option<&str> {
            self.description.as_deref()
        }

        fn resource_links(&self) -> Vec<(String, String)> {
            self.resource_links.clone()
        }

        fn feature_descriptions(&self) -> Vec<FeatureDescription> {
            self.features.clone()
        }

        fn feature_flag_name(&self, feature_gate: &str) -> String {
            match &self.flag_prefix {
                Some(prefix) => format!("{}{}", prefix, feature_gate),
                None => feature_gate.to_string(),
            }
        }

        fn has_project_conf(&self) -> bool {
            !self.config.is_empty()
        }

        fn get_config(
            &self,
            _project: Option<&Project>,
            _user: Option<&User>,
            add_additional_fields: bool,
        ) -> Result<Vec<RawConfigField>> {
            let mut fields = self.config.clone();
            if add_additional_fields {
                fields.extend(self.additional_config.iter().cloned());
            }
            Ok(fields)
        }

        fn release_doc_renderer(&self) -> Option<&dyn ReleaseDocRenderer> {
            match self.doc {
                DocBehavior::Unsupported => None,
                _ => Some(self),
            }
        }

        fn testable(&self) -> Option<&dyn Testable> {
            self.testable.then_some(self as &dyn Testable)
        }

        fn custom_contexts(&self) -> Option<Vec<CustomContext>> {
            self.contexts
                .as_ref()
                .map(|contexts| contexts.iter().map(CustomContext::new).collect())
        }
    }

    impl ReleaseDocRenderer for MockPlugin {
        fn release_doc_html(&self, webhook_url: &str) -> Result<String> {
            match self.doc {
                DocBehavior::Renders => Ok(format!("<p>POST to {}</p>", webhook_url)),
                DocBehavior::NotImplemented => {
                    Err(PluginSystemError::not_implemented(&self.slug, "release_doc_html").into())
                }
                DocBehavior::Fails => Err(Error::Other("template exploded".to_string())),
                DocBehavior::Unsupported => unreachable!("renderer not exposed"),
            }
        }
    }

    impl Testable for MockPlugin {
        fn is_testable(&self) -> bool {
            true
        }
    }
}
