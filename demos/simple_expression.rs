use rechner_rs::ast::{Bindings, Number};

fn main() {
    pretty_env_logger::init();

    let bindings = Bindings::from([
        ("price".to_string(), Number::Integer(120)),
        ("volume".to_string(), Number::Float(2.5)),
    ]);

    let expression = "(price + 10) * volume - 7 / 2";
    match rechner_rs::calculate(expression, &bindings) {
        Ok(result) => println!("{} = {}", expression, result),
        Err(err) => println!("Error: {}", err),
    }

    for broken in ["price +", "(price * 2", "price @ 2", "price + fee"] {
        match rechner_rs::calculate(broken, &bindings) {
            Ok(result) => println!("{} = {}", broken, result),
            Err(err) => println!("{:?} failed: {}", broken, err),
        }
    }
}
