//! Checkpointing through serde.
#![cfg(feature = "serde")]

use elasticflow::*;
use elasticflow_std::*;

#[test]
fn fifo_checkpoint_resumes() {
    let mut fifo = Fifo::<u32>::with_capacity(4).unwrap();
    for item in 1..=3 {
        let _ = fifo.step(&Valid::valid(item), &Ready::new(false));
    }
    let _ = fifo.step(&Valid::invalid(), &Ready::new(true));

    let json = serde_json::to_string(&fifo.state()).unwrap();
    let mut restored = Fifo::<u32>::with_capacity(4).unwrap();
    restored.restore(serde_json::from_str(&json).unwrap()).unwrap();

    for _ in 0..3 {
        let bwd = Ready::new(true);
        assert_eq!(restored.step(&Valid::valid(9), &bwd), fifo.step(&Valid::valid(9), &bwd));
    }
}

#[test]
fn credit_checkpoint_keeps_in_flight_items() {
    let mut buf = CreditBuffer::<u8>::new(CreditConfig { pipe_depth: 2, depth: 0 }).unwrap();
    let _ = buf.step(&Valid::valid(1), &Ready::new(false));
    let _ = buf.step(&Valid::valid(2), &Ready::new(false));

    let json = serde_json::to_string(&buf.state()).unwrap();
    let mut restored = CreditBuffer::<u8>::new(CreditConfig { pipe_depth: 2, depth: 0 }).unwrap();
    restored.restore(serde_json::from_str(&json).unwrap()).unwrap();
    assert_eq!(restored.state(), buf.state());

    let mut out = Vec::new();
    for _ in 0..6 {
        let (o, _) = restored.step(&Valid::invalid(), &Ready::new(true));
        out.extend(o.into_option());
    }
    assert_eq!(out, vec![1, 2]);
}

#[test]
fn channel_values_serialize_as_structs() {
    let json = serde_json::to_value(Valid::valid(Array([1u8, 2]))).unwrap();
    assert_eq!(json, serde_json::json!({ "inner": [1, 2], "valid": true }));
    let selector: Selector<3> = serde_json::from_str(r#"{"Binary":1}"#).unwrap();
    assert_eq!(selector.one_hot().0, [false, true, false]);
}
