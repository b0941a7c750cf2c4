use rechner_rs::ast::{Bindings, Number};

fn main() {
    pretty_env_logger::init();

    let expression = "a - b - c * -(d / 4)";
    let ast = match rechner_rs::parse(expression) {
        Ok(ast) => ast,
        Err(err) => {
            println!("Error: {}", err);
            return;
        }
    };

    println!("Parsed: {}", ast);
    println!("References: {:?}", ast.references());

    let bindings: Bindings = ast
        .references()
        .into_iter()
        .zip(1..)
        .map(|(name, value)| (name, Number::Integer(value * 10)))
        .collect();

    match ast.calculate(&bindings) {
        Ok(result) => println!("Result: {}", result),
        Err(err) => println!("Error: {}", err),
    }
}
