//! The ReAct system-prompt header for dbt project inspection

use dbtlens_tools::ToolRegistry;

/// System header handed to a ReAct-style agent runtime.
///
/// `{tool_desc}` and `{tool_names}` are filled in by
/// [`render_system_header`]; the doubled braces around the JSON examples
/// are literal braces in the rendered prompt.
pub const REACT_SYSTEM_HEADER: &str = "\
dbt is a data framework that helps users manage data tables as dbt models.
You already have the project directory of a dbt project.
You are designed to help with a dbt project, from answering questions \
to providing summaries to other types of analyses.

## Tools
- You have access to tools that retrieve dbt project information.
- Please use a tool if your knowledge is not enough to answer the question, \
and pay attention to the tool's arguments.
- This may require breaking the task into subtasks and using different tools \
to complete each subtask.

You have access to the following tools:
{tool_desc}

## Output Format
To answer the question, please use the following format.

```
Thought: Your initial decision.
Action: tool name (one of {tool_names}) if using a tool.
Action Input: the input to the tool, in a JSON format representing the kwargs (e.g. {{\"input\": \"hello world\", \"num_beams\": 5}})
Observation: tool response
Thought: Your decision on the tool response.
Answer: [your answer here]
```

- Please ALWAYS start with a Thought.
- If you are already able to answer, just end the conversation with the `Answer:` format.
- If you need to use a tool, please use the `Action:` along with `Action Input:` format.
    When using the tools, please use a valid JSON format for the Action Input. Do NOT do this {{'input': 'hello world', 'num_beams': 5}}.
    If this format is used, the user will respond in the following format:
    ```
    Observation: tool response
    ```

    You should keep repeating the above format until you have enough information
    to answer the question without using any more tools. At that point, you MUST respond
    in one of the following two formats:

    ```
    Thought: I can answer without using any more tools.
    Answer: [your answer here]
    ```

    ```
    Thought: I cannot answer the question with the provided tools.
    Answer: Sorry, I cannot answer your query.
    ```

## Current Conversation
Below is the current conversation consisting of interleaving human and assistant messages.

";

/// Fill the header's placeholders from a tool registry.
///
/// `{tool_desc}` becomes one block per tool (name, description, argument
/// schema); `{tool_names}` becomes the comma-separated name list. The
/// doubled-brace JSON examples collapse to single braces.
pub fn render_system_header(registry: &ToolRegistry) -> String {
    let tool_desc = registry
        .iter()
        .map(|tool| {
            format!(
                "> Tool Name: {}\nTool Description: {}\nTool Args: {}\n",
                tool.name(),
                tool.description(),
                tool.args_schema()
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let tool_names = registry.names().join(", ");

    // Collapse the template's doubled braces before inserting tool schemas,
    // whose JSON may legitimately contain `}}`.
    REACT_SYSTEM_HEADER
        .replace("{{", "{")
        .replace("}}", "}")
        .replace("{tool_desc}", &tool_desc)
        .replace("{tool_names}", &tool_names)
}

#[cfg(test)]
mod tests {
    use super::*;
    use dbtlens_core::Document;
    use dbtlens_tools::{Tool, ToolError};
    use serde_json::Value as JsonValue;

    struct StubTool {
        name: &'static str,
        description: &'static str,
    }

    impl Tool for StubTool {
        fn name(&self) -> &str {
            self.name
        }

        fn description(&self) -> &str {
            self.description
        }

        fn args_schema(&self) -> JsonValue {
            serde_json::json!({"type": "object", "properties": {}})
        }

        fn call(&self, _args: &JsonValue) -> Result<Document, ToolError> {
            Ok(Document::new(""))
        }
    }

    fn stub_registry() -> ToolRegistry {
        let mut registry = ToolRegistry::new();
        registry.register(Box::new(StubTool {
            name: "first_tool",
            description: "Does the first thing",
        }));
        registry.register(Box::new(StubTool {
            name: "second_tool",
            description: "Does the second thing",
        }));
        registry
    }

    #[test]
    fn rendered_header_lists_every_tool() {
        let header = render_system_header(&stub_registry());

        assert!(header.contains("> Tool Name: first_tool"));
        assert!(header.contains("Does the first thing"));
        assert!(header.contains("> Tool Name: second_tool"));
        assert!(header.contains("first_tool, second_tool"));
    }

    #[test]
    fn rendered_header_has_no_unsubstituted_placeholders() {
        let header = render_system_header(&stub_registry());

        assert!(!header.contains("{tool_desc}"));
        assert!(!header.contains("{tool_names}"));
    }

    #[test]
    fn json_examples_keep_single_braces() {
        let header = render_system_header(&stub_registry());

        assert!(header.contains(r#"{"input": "hello world", "num_beams": 5}"#));
    }
}
