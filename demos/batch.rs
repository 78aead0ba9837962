extern crate spline_steps;

use spline_steps::{Boundary, Point, SplineSolver};

fn main() {

    let x_min = 0.0;
    let x_max = 6.0;

    let points = vec![
        Point::new(x_min, 1.0, 0),
        Point::new(1.0, -1.0, 1),
        Point::new(2.0, 0.0, 2),
        Point::new(4.0, 3.0, 3),
        Point::new(5.0, 1.0, 4),
        Point::new(x_max, 1.0, 5)
    ];

    let result = SplineSolver::new()
        .solve_points(points, &Boundary::clamped(0.0, -1.0))
        .unwrap();
    let spline = result.get_spline();

    let number_of_steps = 60;
    let step = (x_max - x_min) / number_of_steps as f64;

    let mut x_vector = Vec::new();

    for i in 0..=number_of_steps {
        x_vector.push(x_min + step * i as f64);
    }

    let values = spline.batch_interpolate(&x_vector).unwrap();

    println!("x;y");
    for i in 0..=number_of_steps {
        println!("{:.2};{:.2}", x_vector[i], values[i]);
    }
}
