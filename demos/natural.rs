extern crate spline_steps;

use spline_steps::{Boundary, RawPoint, SplineSolver};

fn main() {

    let points = vec![
        RawPoint::new("0", "0"),
        RawPoint::new("1", "1"),
        RawPoint::new("2", "0"),
        RawPoint::new("3.5", "-1"),
    ];

    let result = match SplineSolver::new().solve(&points, &Boundary::Natural) {
        Ok(result) => result,
        Err(error) => {
            eprintln!("{}", error);
            return;
        }
    };

    let system = result.get_system();
    println!("unknowns: {}", system.labels().join(", "));
    for (kind, line) in system.get_equations().iter().zip(system.to_string().lines()) {
        println!("{:<20} {}", kind.to_string(), line);
    }

    println!();
    for (label, value) in system.labels().iter().zip(result.get_solution().iter()) {
        println!("{} = {:.6}", label, value);
    }

    println!();
    for segment in result.get_segments() {
        println!("{}", segment);
    }
}
