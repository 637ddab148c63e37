use anyhow::Result;

use tvbuild_lib::chunk::ChunkPartitioner;

use crate::output::{OutputFormat, print_json, symbols};

pub fn cmd_chunk(modules: &[String], output: OutputFormat) -> Result<()> {
  let partitioner = ChunkPartitioner::default();

  let assignments: Vec<(&str, Option<&str>)> = modules
    .iter()
    .map(|module| (module.as_str(), partitioner.assign(module)))
    .collect();

  if output.is_json() {
    let json: serde_json::Map<String, serde_json::Value> = assignments
      .iter()
      .map(|(module, chunk)| (module.to_string(), serde_json::json!(chunk)))
      .collect();
    return print_json(&json);
  }

  for (module, chunk) in assignments {
    println!("{} {} {}", module, symbols::ARROW, chunk.unwrap_or("(entry)"));
  }

  Ok(())
}
