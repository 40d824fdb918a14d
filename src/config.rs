/// Fixed parts of the external tool command line.
///
/// The defaults describe `ansible localhost -i /dev/null -m debug -a msg="..."`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolConfig {
    /// Executable looked up on PATH.
    pub program: String,
    /// Host pattern the ad-hoc command targets.
    pub host: String,
    /// Inventory source; an empty one leaves only the implicit localhost.
    pub inventory: String,
    /// Module that renders the message.
    pub module: String,
    /// Module argument that receives the expression.
    pub message_key: String,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            program: "ansible".to_string(),
            host: "localhost".to_string(),
            inventory: "/dev/null".to_string(),
            module: "debug".to_string(),
            message_key: "msg".to_string(),
        }
    }
}

impl ToolConfig {
    /// Same invocation shape, different executable.
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }
}
