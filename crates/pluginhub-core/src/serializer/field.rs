use log::debug;

use crate::kernel::constants::{DEFAULT_FIELD_TYPE, SECRET_FIELD_TYPE};
use crate::kernel::error::Result;
use crate::plugin_system::config_field::RawConfigField;
use crate::plugin_system::context::Project;
use crate::plugin_system::traits::Plugin;
use crate::serializer::view_model::{NormalizedConfigField, StoredValue};
use crate::storage::option::OptionStore;
use crate::utils::title_case;

/// Label derived from a field name: `"api_key"` becomes `"Api Key"`.
///
/// Word boundaries come from the raw name, so underscores are only
/// replaced after title-casing.
pub fn default_label(name: &str) -> String {
    title_case(name).replace('_', " ")
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Normalize one raw field descriptor for output.
///
/// Secret fields expose only whether a value is saved; every other field
/// carries its stored option value, read once from `options`.
pub fn serialize_field(
    project: Option<&Project>,
    plugin: &dyn Plugin,
    field: &RawConfigField,
    options: &dyn OptionStore,
) -> Result<NormalizedConfigField> {
    let field_type = field.field_type.as_deref().unwrap_or(DEFAULT_FIELD_TYPE);

    let stored = if field_type == SECRET_FIELD_TYPE {
        StoredValue::Secret {
            has_saved_value: field.has_saved_value.unwrap_or(false),
            prefix: field.prefix.clone().unwrap_or_default(),
        }
    } else {
        StoredValue::Plain {
            value: plugin.get_option(&field.name, project, options)?,
        }
    };

    debug!("Serialized config field '{}' of plugin '{}'", field.name, plugin.slug());

    Ok(NormalizedConfigField {
        name: field.name.clone(),
        label: field.label.clone().unwrap_or_else(|| default_label(&field.name)),
        field_type: field_type.to_string(),
        required: field.required.unwrap_or(true),
        help: non_empty(field.help.as_deref()),
        placeholder: non_empty(field.placeholder.as_deref()),
        choices: field.choices.clone(),
        readonly: field.readonly.unwrap_or(false),
        default_value: field.default.clone(),
        stored,
    })
}
