extern crate spline_steps;

use spline_steps::{validate, BoundaryMode, RawPoint, SplineSolver};

fn main() {

    let function = "sin(x) + x^2 / 4";
    let xs = [0.0, 0.5, 1.5, 2.0, 3.0];

    let raw: Vec<RawPoint> = xs.iter().map(|x| RawPoint::new(x.to_string(), "0")).collect();
    let issues = validate(&raw, Some(function));
    if !issues.is_empty() {
        for issue in issues {
            eprintln!("{}", issue);
        }
        return;
    }

    let result = SplineSolver::new()
        .solve_function(function, &xs, BoundaryMode::Clamped)
        .unwrap();

    println!("boundary: {:?}", result.get_boundary());
    for segment in result.get_segments() {
        println!("{}", segment);
    }

    println!("x;spline");
    for i in 0..=30 {
        let x = 3.0 * i as f64 / 30.0;
        println!("{:.2};{:.4}", x, result.get_spline().interpolate(x).unwrap());
    }
}
