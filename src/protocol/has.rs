use async_trait::async_trait;

use crate::protocol::command::{Command, wrong_arity};
use crate::protocol::resp::Value;
use crate::provider::ApiKeys;

/// HAS key
pub struct HasCmd;

#[async_trait]
impl Command for HasCmd {
    fn name(&self) -> &'static str {
        "HAS"
    }

    async fn execute(&self, items: &[Value], keys: &ApiKeys) -> Value {
        match items {
            [_, key] => Value::from_bool(keys.has_loose(key)),
            _ => wrong_arity(self.name()),
        }
    }
}
