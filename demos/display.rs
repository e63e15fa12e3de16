use linear_undo::{Record, Set};

fn main() {
    let mut target = 0;
    let mut record = Record::new();

    for value in 1..=6 {
        record
            .submit(&mut target, Set::new(value))
            .expect("target is in sync");
    }
    assert_eq!(target, 6);

    record.set_saved(true);

    record.undo(&mut target).unwrap();
    record.undo(&mut target).unwrap();
    assert_eq!(target, 4);

    println!("{}", record.display());
}
