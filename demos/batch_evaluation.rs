use log::info;
use rechner_rs::ast::{Bindings, Number};
use rechner_rs::{Calculator, CalculatorConfig};

fn main() {
    pretty_env_logger::init();

    let contexts = vec![
        Bindings::from([
            ("price".to_string(), Number::Float(120.0)),
            ("volume".to_string(), Number::Integer(3000)),
        ]),
        Bindings::from([
            ("price".to_string(), Number::Float(80.5)),
            ("volume".to_string(), Number::Integer(6000)),
        ]),
        Bindings::from([("price".to_string(), Number::Integer(95))]),
    ];

    let mut calculator = Calculator::new(CalculatorConfig {
        cache_capacity: 16,
        ..CalculatorConfig::default()
    });

    let expression = "price * volume / 1000";
    for (i, context) in contexts.iter().enumerate() {
        match calculator.calculate(expression, context) {
            Ok(result) => println!("Result {}: {}", i, result),
            Err(err) => println!("Result {}: error: {}", i, err),
        }
    }
    info!("{} compiled expression(s) cached", calculator.cached_len());

    let compiled = match calculator.compile(expression) {
        Ok(compiled) => compiled,
        Err(err) => {
            println!("Error: {}", err);
            return;
        }
    };
    let results: Vec<_> = contexts.iter().map(|context| compiled.invoke(context)).collect();
    println!("{}: {:?}", compiled, results);
}
