use async_trait::async_trait;

use crate::protocol::command::{Command, wrong_arity};
use crate::protocol::resp::Value;
use crate::provider::ApiKeys;
use crate::store::Lookup;

/// GET key
///
/// Replies with the value as a bulk string, a null bulk string when nothing
/// is stored, or `:0` when the key itself is invalid.
pub struct GetCmd;

#[async_trait]
impl Command for GetCmd {
    fn name(&self) -> &'static str {
        "GET"
    }

    async fn execute(&self, items: &[Value], keys: &ApiKeys) -> Value {
        let [_, key] = items else {
            return wrong_arity(self.name());
        };

        match keys.get_loose(key) {
            Lookup::Found(value) => Value::BulkString(Some(value.into_bytes())),
            Lookup::NotFound => Value::null(),
            Lookup::InvalidKey => Value::from_bool(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::provider::ApiKeysProvider;

    #[tokio::test]
    async fn test_get_cmd_execute() {
        let keys = ApiKeysProvider::new().instance();
        keys.set("testkey", "testvalue");

        let items = Value::command(["GET", "testkey"]).into_items();

        let result = GetCmd.execute(&items, &keys).await;

        assert_eq!(result, Value::BulkString(Some(b"testvalue".to_vec())));
    }

    #[tokio::test]
    async fn test_get_cmd_execute_not_found() {
        let keys = ApiKeysProvider::new().instance();

        let items = Value::command(["GET", "nonexistent"]).into_items();

        let result = GetCmd.execute(&items, &keys).await;

        assert_eq!(result, Value::null());
    }

    #[tokio::test]
    async fn test_get_cmd_invalid_key() {
        let keys = ApiKeysProvider::new().instance();
        let name = Value::BulkString(Some(b"GET".to_vec()));

        let invalid = [
            Value::BulkString(Some(Vec::new())),
            Value::BulkString(None),
            Value::Integer(0),
        ];

        for bad in invalid {
            let result = GetCmd.execute(&[name.clone(), bad], &keys).await;
            assert_eq!(result, Value::from_bool(false));
        }
    }

    #[tokio::test]
    async fn test_get_cmd_wrong_args() {
        let keys = ApiKeysProvider::new().instance();

        let result = GetCmd.execute(&Value::command(["GET"]).into_items(), &keys).await;

        assert_eq!(
            result,
            Value::error("ERR wrong number of arguments for 'get' command")
        );
    }
}
