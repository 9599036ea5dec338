// Study pack generation: prompt, response schema, the generator port and its
// Gemini-backed implementation. All LLM calls go through llm_client.

pub mod generator;
pub mod handlers;
pub mod prompts;
pub mod schema;
