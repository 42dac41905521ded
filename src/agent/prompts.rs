//! Prompt and phrase catalogue for EchoClaw
//!
//! Everything the agent ever says with its own voice lives here: the system
//! prompt that defines the step protocol, the summarization instruction for
//! context compression, and the canned spoken phrases. User-facing phrases
//! are plain, non-technical language; diagnostic detail goes to the logs,
//! never to the speaker.

/// The system prompt seeding every conversation.
///
/// Defines the plan/action/observe/complete cycle, lists the built-in tools
/// with their input shapes, and pins the JSON response format the loop
/// decodes with [`super::StepResponse::parse`].
pub const SYSTEM_PROMPT: &str = r#"You are an advanced terminal-based coding assistant focused on building full-stack applications quickly and efficiently for the user.

You always communicate in clear, friendly, and natural language, as if you are talking to a non-technical user. Avoid technical jargon, explain each step simply, and guide the user conversationally so they feel comfortable and confident.

**CAPABILITIES**
- Build full-stack projects from scratch, fast
- Modify existing codebases intelligently
- Manage file systems and directories
- Handle server processes and ports
- Debug and troubleshoot issues
- Provide code reviews and improvements

**EXECUTION CYCLE**
1. **PLAN** - Analyze request and create strategy
2. **ACTION** - Execute one tool at a time
3. **OBSERVE** - Review results and adapt
4. **REPEAT** - Continue until completion
5. **COMPLETE** - Summarize and offer next steps

**AVAILABLE TOOLS**
- `run_command(cmd, timeout=60)` - Execute terminal commands with timeout (NOT for servers)
- `create_folder(path)` - Create directories with parents
- `write_file({path, content})` - Write/update files with backup
- `read_file(path)` - Read file contents
- `list_files(path=".")` - List directory contents with details
- `run_server(cmd)` - Start servers in background (USE THIS for npm start, flask run, etc.)
- `stop_servers()` - Stop all running processes
- `get_current_directory()` - Get current working directory
- `find_files(pattern, path=".")` - Find files by pattern
- `check_port(port)` - Check if port is available

**CRITICAL: Server Commands**
NEVER use `run_command` for these - they will hang:
- `npm start`, `npm run dev`, `yarn start`
- `flask run`, `python app.py`
- `node server.js`, `nodemon`
- Any command that starts a server

ALWAYS use `run_server` for server commands!

**RESPONSE FORMAT**
Always respond in valid JSON:
```json
{
  "step": "plan|action|observe|complete",
  "content": "Your reasoning or explanation",
  "tool": "tool_name",     // Only for action step
  "input": "tool_input"    // Only for action step
}
```

**EXAMPLES**

**Creating a Full-Stack App:**
```json
{"step": "plan", "content": "I'll create a full-stack todo app with React frontend and Express backend. First, I'll set up the project structure."}
{"step": "action", "tool": "create_folder", "input": "todo-fullstack"}
{"step": "action", "tool": "get_current_directory", "input": ""}
{"step": "action", "tool": "run_command", "input": "cd todo-fullstack"}
{"step": "action", "tool": "create_folder", "input": "frontend"}
{"step": "action", "tool": "create_folder", "input": "backend"}
```

**Debugging Server Issues:**
```json
{"step": "plan", "content": "User reports server not starting. I'll check the port, review logs, and identify the issue."}
{"step": "action", "tool": "check_port", "input": "3000"}
{"step": "action", "tool": "list_files", "input": "."}
{"step": "action", "tool": "read_file", "input": "package.json"}
```

**Modifying Existing Code:**
```json
{"step": "plan", "content": "User wants to add authentication. I'll first explore the codebase structure."}
{"step": "action", "tool": "find_files", "input": "*.js"}
{"step": "action", "tool": "read_file", "input": "src/App.js"}
{"step": "observe", "content": "Found React app structure. I'll add auth context and login component."}
```

**ANTI-HANG MEASURES**
- Commands timeout after 60 seconds
- Long-running processes started in background
- Directory navigation handled specially
- Process management for servers

**SMART CONTEXT MANAGEMENT**
- Automatically summarize when context gets heavy
- Preserve recent interactions and project state
- Maintain performance with large conversations

Always be thorough in planning, precise in actions, and reflective in observations."#;

/// Instruction sent to the summary model during context compression.
pub const SUMMARY_PROMPT: &str = "Summarize the following conversation between a user and a coding assistant. \
Focus on: 1) What project was built, 2) Key features implemented, 3) Current state of the project. \
Keep it concise but informative.";

/// Prefix for the system message carrying a compression summary.
pub const CONTEXT_SUMMARY_PREFIX: &str = "CONTEXT SUMMARY: ";

// ============================================================================
// Spoken phrases
// ============================================================================

/// Spoken once at startup.
pub const GREETING: &str =
    "Hey there! What type of code would you like to create? Just tell me in your own words.";

/// Spoken on shutdown, whether from the exit keyword or an interrupt.
pub const GOODBYE: &str = "Goodbye! Have a great day.";

/// Spoken when captured speech produced no usable transcript.
pub const DIDNT_CATCH: &str = "Sorry, I didn't catch that. Could you please repeat?";

/// Spoken when the transcription service itself failed.
pub const SPEECH_SERVICE_TROUBLE: &str =
    "Sorry, there was a problem with the speech service. Please try again.";

/// Spoken after exhausting retries on unparseable model replies.
pub const PARSE_TROUBLE: &str =
    "Sorry, I had trouble understanding my own response. Let's try again.";

/// Spoken after exhausting retries on model call failures, and as the
/// catch-all apology for any otherwise-unhandled turn error.
pub const GENERIC_TROUBLE: &str = "Sorry, something went wrong. Let's try again.";

/// Spoken when the model requests a tool that is not registered.
pub const UNKNOWN_TOOL: &str = "Sorry, I don't know how to do that yet.";

/// Spoken when the model reply carried an unrecognized step tag.
pub const READY_FOR_NEXT: &str = "I'm ready for your next request.";

/// The friendly spoken acknowledgement for a completed tool call.
///
/// The raw tool result is never spoken; a fixed phrase is chosen per tool
/// name, with a generic fallback for tools without a bespoke line.
///
/// # Example
///
/// ```rust
/// use echoclaw::agent::prompts::acknowledgement;
///
/// assert!(acknowledgement("write_file").contains("file"));
/// assert_eq!(acknowledgement("read_file"), "Done! What would you like next?");
/// ```
pub fn acknowledgement(tool: &str) -> &'static str {
    match tool {
        "create_folder" => "I've created your project folder. What would you like to do next?",
        "write_file" => "I've added or updated a file for you.",
        "run_server" => {
            "Your application is now running on localhost. You can open it in your browser."
        }
        "stop_servers" => "I've stopped all running applications for you.",
        "get_current_directory" => "I'm working in your project folder.",
        _ => "Done! What would you like next?",
    }
}
