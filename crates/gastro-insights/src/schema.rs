//! Response schemas declared to the generation service.
//!
//! The service is asked to shape its JSON output after these. Conformance is
//! still checked locally when the payload is converted into a typed result.

use std::collections::BTreeMap;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SchemaType {
    String,
    Array,
    Object,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    #[serde(rename = "type")]
    pub kind: SchemaType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
    #[serde(rename = "enum", skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub items: Option<Box<Schema>>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub properties: BTreeMap<String, Schema>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub required: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub property_ordering: Vec<String>,
}

impl Schema {
    fn of(kind: SchemaType) -> Self {
        Self {
            kind,
            description: None,
            format: None,
            enum_values: Vec::new(),
            items: None,
            properties: BTreeMap::new(),
            required: Vec::new(),
            property_ordering: Vec::new(),
        }
    }

    #[must_use]
    pub fn string() -> Self {
        Self::of(SchemaType::String)
    }

    /// A string restricted to a fixed set of values.
    #[must_use]
    pub fn string_enum(values: &[&str]) -> Self {
        let mut schema = Self::of(SchemaType::String);
        schema.format = Some("enum".to_string());
        schema.enum_values = values.iter().map(|v| (*v).to_string()).collect();
        schema
    }

    #[must_use]
    pub fn array(items: Schema) -> Self {
        let mut schema = Self::of(SchemaType::Array);
        schema.items = Some(Box::new(items));
        schema
    }

    /// An object whose properties are all required, emitted in the given order.
    #[must_use]
    pub fn object(properties: Vec<(&str, Schema)>) -> Self {
        let mut schema = Self::of(SchemaType::Object);
        for (name, property) in properties {
            schema.required.push(name.to_string());
            schema.property_ordering.push(name.to_string());
            schema.properties.insert(name.to_string(), property);
        }
        schema
    }

    #[must_use]
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn object_schema_serializes_in_service_format() {
        let schema = Schema::array(Schema::object(vec![
            ("title", Schema::string()),
            (
                "impact",
                Schema::string().with_description("High, Medium, or Low"),
            ),
        ]));

        let json = serde_json::to_value(&schema).unwrap();
        assert_eq!(json["type"], "ARRAY");
        assert_eq!(json["items"]["type"], "OBJECT");
        assert_eq!(json["items"]["properties"]["title"]["type"], "STRING");
        assert_eq!(
            json["items"]["properties"]["impact"]["description"],
            "High, Medium, or Low"
        );
        assert_eq!(json["items"]["required"], serde_json::json!(["title", "impact"]));
        assert_eq!(
            json["items"]["propertyOrdering"],
            serde_json::json!(["title", "impact"])
        );
    }

    #[test]
    fn string_enum_carries_format_and_values() {
        let json = serde_json::to_value(Schema::string_enum(&["a", "b"])).unwrap();
        assert_eq!(json["format"], "enum");
        assert_eq!(json["enum"], serde_json::json!(["a", "b"]));
    }

    #[test]
    fn empty_fields_are_omitted() {
        let json = serde_json::to_value(Schema::string()).unwrap();
        assert_eq!(json, serde_json::json!({ "type": "STRING" }));
    }
}
