use nextval_core::Value;
use nextval_dispatch::{DispatchEngine, GenerateError};

fn main() {
    let mut engine = DispatchEngine::new();
    engine.register("snowflake", |_, zero| {
        if !zero {
            return Err(GenerateError::Skip);
        }
        Ok(Value::Uint(750_350_266_425))
    });
    engine.register("display_id", |_, zero| {
        if !zero {
            return Err(GenerateError::Skip);
        }
        Ok(Value::Text("20220101A01".to_string()))
    });

    for tag in engine.registry().tags() {
        println!("{tag}");
    }
}
