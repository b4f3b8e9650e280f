use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Acknowledgment returned after inserting one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: Value,
}

impl InsertAck {
    pub fn new(inserted_id: Value) -> Self {
        Self { acknowledged: true, inserted_id }
    }
}

/// Acknowledgment returned after deleting by id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteAck {
    pub fn new(deleted_count: u64) -> Self {
        Self { acknowledged: true, deleted_count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn acks_use_driver_field_names() {
        let insert = serde_json::to_value(InsertAck::new(json!("65a1b2c3d4e5f60718293a4b"))).unwrap();
        assert_eq!(insert, json!({ "acknowledged": true, "insertedId": "65a1b2c3d4e5f60718293a4b" }));

        let delete = serde_json::to_value(DeleteAck::new(1)).unwrap();
        assert_eq!(delete, json!({ "acknowledged": true, "deletedCount": 1 }));
    }
}
