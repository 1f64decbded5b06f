use async_trait::async_trait;

use crate::protocol::command::{Command, wrong_arity};
use crate::protocol::resp::Value;
use crate::provider::ApiKeys;

/// SET key value
///
/// Replies `:1` when stored and `:0` when the key or value is not a
/// non-empty string.
pub struct SetCmd;

#[async_trait]
impl Command for SetCmd {
    fn name(&self) -> &'static str {
        "SET"
    }

    async fn execute(&self, items: &[Value], keys: &ApiKeys) -> Value {
        match items {
            [_, key, value] => Value::from_bool(keys.set_loose(key, value)),
            _ => wrong_arity(self.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ApiKeysProvider;
    use crate::store::Lookup;

    #[tokio::test]
    async fn test_set_cmd_execute_success() {
        let keys = ApiKeysProvider::new().instance();
        let items = [
            Value::BulkString(Some(b"SET".to_vec())),
            Value::BulkString(Some(b"key".to_vec())),
            Value::SimpleString("value".to_string()),
        ];

        let result = SetCmd.execute(&items, &keys).await;

        assert_eq!(result, Value::from_bool(true));
        assert_eq!(keys.get("key"), Lookup::Found("value".to_string()));
    }

    #[tokio::test]
    async fn test_set_cmd_rejects_non_string_arguments() {
        let keys = ApiKeysProvider::new().instance();
        let name = Value::BulkString(Some(b"SET".to_vec()));
        let key = Value::BulkString(Some(b"key".to_vec()));
        let invalid = [
            Value::BulkString(Some(Vec::new())),
            Value::BulkString(None),
            Value::Integer(1),
            Value::Array(Some(vec![Value::Integer(1)])),
        ];

        for bad in &invalid {
            let result = SetCmd
                .execute(&[name.clone(), bad.clone(), key.clone()], &keys)
                .await;
            assert_eq!(result, Value::from_bool(false), "key {bad:?}");

            let result = SetCmd
                .execute(&[name.clone(), key.clone(), bad.clone()], &keys)
                .await;
            assert_eq!(result, Value::from_bool(false), "value {bad:?}");
        }

        assert_eq!(keys.get("key"), Lookup::NotFound);
    }

    #[tokio::test]
    async fn test_set_cmd_execute_wrong_args() {
        let keys = ApiKeysProvider::new().instance();
        let items = [
            Value::BulkString(Some(b"SET".to_vec())),
            Value::BulkString(Some(b"key".to_vec())),
        ];

        let result = SetCmd.execute(&items, &keys).await;

        assert_eq!(
            result,
            Value::error("ERR wrong number of arguments for 'set' command")
        );
    }
}
