use std::time::Instant;

use rand::rngs::StdRng;
use rand::SeedableRng;

use mlp::{Example, Network, Trainer};

fn truth_table(gate: impl Fn(bool, bool) -> bool) -> Vec<Example> {
    let mut examples = vec![];
    for a in [false, true] {
        for b in [false, true] {
            let bit = |x: bool| if x { 1.0 } else { 0.0 };
            examples.push(Example::new(vec![bit(a), bit(b)], vec![bit(gate(a, b))]));
        }
    }
    examples
}

fn main() {
    let gates: [(&str, fn(bool, bool) -> bool); 3] = [
        ("or", |a, b| a || b),
        ("and", |a, b| a && b),
        ("xor", |a, b| a != b),
    ];

    for (name, gate) in gates {
        let examples = truth_table(gate);
        let mut rng = StdRng::seed_from_u64(1);
        let mut net = Network::new(&[2, 4, 1], 0.5, &mut rng).unwrap();
        let mut trainer = Trainer::new(rng);

        let num_epochs = 5000;
        let t0 = Instant::now();
        let history = trainer
            .train_epochs(&mut net, &examples, num_epochs, |_| {})
            .unwrap();
        let last = history.last().unwrap();
        println!(
            "{name}: trained {num_epochs} epochs in {:?}, loss={:.5} accuracy={:.2}",
            t0.elapsed(),
            last.loss,
            last.accuracy
        );

        for e in &examples {
            let yh = net.predict(e.input.view()).unwrap();
            println!("    {} -> {:.4} (expected {})", e.input, yh[0], e.expected[0]);
        }
    }
}
