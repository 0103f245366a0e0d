//! Scripted process executor for unit tests

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use galaxy_runner::{CommandExecutor, RunOutput};

/// Record of one executor invocation
#[derive(Clone, Debug)]
pub struct ScriptedCall {
    pub program: String,
    pub args: Vec<String>,
    pub env: Vec<(String, String)>,
}

impl ScriptedCall {
    pub fn has_env(&self, key: &str, value: &str) -> bool {
        self.env.iter().any(|(k, v)| k == key && v == value)
    }
}

/// Returns pre-configured outputs in order and records every call
pub struct ScriptedExecutor {
    outputs: Mutex<VecDeque<RunOutput>>,
    calls: Mutex<Vec<ScriptedCall>>,
}

impl ScriptedExecutor {
    pub fn new(outputs: impl IntoIterator<Item = RunOutput>) -> Arc<Self> {
        Arc::new(Self {
            outputs: Mutex::new(outputs.into_iter().collect()),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn calls(&self) -> Vec<ScriptedCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl CommandExecutor for ScriptedExecutor {
    fn execute(
        &self,
        program: &str,
        args: &[String],
        env: &[(String, String)],
    ) -> galaxy_runner::Result<RunOutput> {
        self.calls.lock().unwrap().push(ScriptedCall {
            program: program.to_string(),
            args: args.to_vec(),
            env: env.to_vec(),
        });
        let output = self.outputs.lock().unwrap().pop_front();
        Ok(output.unwrap_or_else(|| panic!("unexpected call: {} {}", program, args.join(" "))))
    }
}
