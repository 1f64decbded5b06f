use std::collections::HashMap;

use async_trait::async_trait;

use crate::protocol::get::GetCmd;
use crate::protocol::has::HasCmd;
use crate::protocol::resp::Value;
use crate::protocol::set::SetCmd;
use crate::provider::ApiKeys;

/// A command executor
#[async_trait]
pub trait Command: Send + Sync {
    /// Upper-case command name used for dispatch
    fn name(&self) -> &'static str;

    /// Execute with the full argument array, command name included
    async fn execute(&self, items: &[Value], keys: &ApiKeys) -> Value;
}

/// Reply for a command called with the wrong number of arguments
pub(crate) fn wrong_arity(name: &str) -> Value {
    Value::error(format!(
        "ERR wrong number of arguments for '{}' command",
        name.to_lowercase()
    ))
}

/// Dispatches RESP arrays to registered commands by name
pub struct CommandFactory {
    commands: HashMap<&'static str, Box<dyn Command>>,
}

impl CommandFactory {
    /// Create a factory with every supported command registered
    pub fn init() -> Self {
        let mut factory = Self {
            commands: HashMap::new(),
        };
        factory.register(Box::new(SetCmd));
        factory.register(Box::new(GetCmd));
        factory.register(Box::new(HasCmd));
        factory
    }

    fn register(&mut self, cmd: Box<dyn Command>) {
        self.commands.insert(cmd.name(), cmd);
    }

    /// Parse and execute a RESP command against the given key handle
    pub async fn execute(&self, value: Value, keys: &ApiKeys) -> Value {
        let items = match value {
            Value::Array(Some(items)) if !items.is_empty() => items,
            _ => return Value::error("ERR failed to parse command"),
        };

        // First item should be the command name
        let cmd_name = match &items[0] {
            Value::BulkString(Some(data)) => String::from_utf8_lossy(data).to_uppercase(),
            Value::SimpleString(s) => s.to_uppercase(),
            _ => return Value::error("ERR invalid command format"),
        };

        match self.commands.get(cmd_name.as_str()) {
            Some(cmd) => cmd.execute(&items, keys).await,
            None => Value::error(format!("ERR unknown command '{}'", cmd_name)),
        }
    }
}
