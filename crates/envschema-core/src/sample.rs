//! Example values per field type, used by example-file generation

use crate::schema::FieldType;

/// A plausible sample value for a field type
pub fn example_value(field_type: FieldType) -> &'static str {
    match field_type {
        FieldType::String => "example",
        FieldType::Number => "42",
        FieldType::Boolean => "true",
        FieldType::Url => "https://example.com",
        FieldType::Port => "8080",
        FieldType::Email => "user@example.com",
        FieldType::Ip => "127.0.0.1",
        FieldType::Json => "{\"key\": \"value\"}",
        FieldType::Regex => "abc123",
    }
}
