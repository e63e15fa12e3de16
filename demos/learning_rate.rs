use linear_undo::{Record, Set, Signal};
use tracing_subscriber::EnvFilter;

#[derive(Debug)]
struct Model {
    learning_rate: f64,
}

fn learning_rate(lr: f64) -> Set<Model, f64> {
    Set::field(|m: &mut Model| &mut m.learning_rate, lr)
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut model = Model {
        learning_rate: 0.01,
    };
    let mut record = Record::builder()
        .connect(|signal: Signal| println!("  -> {signal:?}"))
        .build();
    println!("initial learning rate: {}", model.learning_rate);

    for lr in [0.001, 0.0001] {
        record
            .submit(&mut model, learning_rate(lr))
            .expect("learning rate is in sync");
        println!("learning rate: {}", model.learning_rate);
    }

    for _ in 0..3 {
        match record.undo(&mut model) {
            Ok(()) => println!("undo: {}", model.learning_rate),
            Err(err) => println!("undo failed: {err}"),
        }
    }

    for _ in 0..3 {
        match record.redo(&mut model) {
            Ok(()) => println!("redo: {}", model.learning_rate),
            Err(err) => println!("redo failed: {err}"),
        }
    }
}
