//! Conversion between request/response JSON and stored BSON documents.
//!
//! Responses render documents the way the Node driver does once they pass
//! through `JSON.stringify`: object ids become hex strings and datetimes
//! become RFC 3339 strings instead of extended-JSON wrappers.

use mongodb::bson::{self, oid::ObjectId, Bson, Document};
use serde_json::{Map, Number, Value};

use crate::errors::ModelError;

/// Parse a path segment into an object id.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, ModelError> {
    ObjectId::parse_str(raw).map_err(|_| ModelError::InvalidId(raw.to_string()))
}

/// Turn a client-supplied body into a document. Only JSON objects are storable.
pub fn json_to_document(value: Value) -> Result<Document, ModelError> {
    match value {
        Value::Object(map) => {
            bson::to_document(&map).map_err(|e| ModelError::Conversion(e.to_string()))
        }
        _ => Err(ModelError::NotAnObject),
    }
}

pub fn document_to_json(doc: Document) -> Value {
    Value::Object(doc.into_iter().map(|(k, v)| (k, bson_to_json(v))).collect::<Map<_, _>>())
}

pub fn documents_to_json(docs: Vec<Document>) -> Value {
    Value::Array(docs.into_iter().map(document_to_json).collect())
}

pub fn bson_to_json(value: Bson) -> Value {
    match value {
        Bson::ObjectId(oid) => Value::String(oid.to_hex()),
        Bson::DateTime(dt) => match dt.try_to_rfc3339_string() {
            Ok(s) => Value::String(s),
            Err(_) => Value::from(dt.timestamp_millis()),
        },
        Bson::Document(doc) => document_to_json(doc),
        Bson::Array(items) => Value::Array(items.into_iter().map(bson_to_json).collect()),
        Bson::String(s) => Value::String(s),
        Bson::Boolean(b) => Value::Bool(b),
        Bson::Int32(i) => Value::from(i),
        Bson::Int64(i) => Value::from(i),
        Bson::Double(f) => Number::from_f64(f).map(Value::Number).unwrap_or(Value::Null),
        Bson::Null | Bson::Undefined => Value::Null,
        other => other.into_relaxed_extjson(),
    }
}

/// Read the `_id` of a document as an object id, if it has one.
pub fn object_id_of(doc: &Document) -> Option<ObjectId> {
    doc.get_object_id("_id").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mongodb::bson::{doc, DateTime};
    use serde_json::json;

    #[test]
    fn rejects_malformed_ids() {
        assert!(matches!(parse_object_id("not-an-id"), Err(ModelError::InvalidId(_))));
        assert!(parse_object_id("65a1b2c3d4e5f60718293a4b").is_ok());
    }

    #[test]
    fn object_ids_render_as_hex() {
        let oid = ObjectId::parse_str("65a1b2c3d4e5f60718293a4b").unwrap();
        let rendered = document_to_json(doc! {
            "_id": oid,
            "name": "Chicken Biryani",
            "price": 12.5,
            "tags": ["rice", "spicy"],
            "servings": 4_i32,
        });
        assert_eq!(
            rendered,
            json!({
                "_id": "65a1b2c3d4e5f60718293a4b",
                "name": "Chicken Biryani",
                "price": 12.5,
                "tags": ["rice", "spicy"],
                "servings": 4,
            })
        );
    }

    #[test]
    fn datetimes_render_as_rfc3339() {
        let rendered = bson_to_json(Bson::DateTime(DateTime::from_millis(0)));
        assert_eq!(rendered, json!("1970-01-01T00:00:00Z"));
    }

    #[test]
    fn nested_bodies_convert_to_documents() {
        let doc = json_to_document(json!({
            "email": "a@b.com",
            "rating": 5,
            "meta": { "source": "web" },
        }))
        .unwrap();
        assert_eq!(doc.get_str("email").unwrap(), "a@b.com");
        assert_eq!(doc.get_document("meta").unwrap().get_str("source").unwrap(), "web");
        assert_eq!(document_to_json(doc)["rating"], json!(5));
    }

    #[test]
    fn non_object_bodies_are_rejected() {
        assert!(matches!(json_to_document(json!([1, 2])), Err(ModelError::NotAnObject)));
        assert!(matches!(json_to_document(json!("text")), Err(ModelError::NotAnObject)));
    }
}
