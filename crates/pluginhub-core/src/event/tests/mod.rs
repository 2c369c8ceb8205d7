
#[cfg(test)]
mod tests {
    use crate::event::{Attribute, AttributeType};

    #[test]
    fn test_attribute_defaults() {
        let attribute = Attribute::new("group_id");
        assert_eq!(attribute.kind, AttributeType::Str);
        assert!(attribute.required);
    }

    #[test]
    fn test_attribute_builders() {
        let attribute = Attribute::new("user_id").with_type(AttributeType::Int).optional();
        assert_eq!(attribute.name, "user_id");
        assert_eq!(attribute.kind, AttributeType::Int);
        assert!(!attribute.required);
    }

    #[test]
    fn test_attribute_type_display() {
        assert_eq!(AttributeType::Str.to_string(), "str");
        assert_eq!(AttributeType::Int.to_string(), "int");
        assert_eq!(AttributeType::Bool.to_string(), "bool");
        assert_eq!(AttributeType::Float.to_string(), "float");
    }
}
