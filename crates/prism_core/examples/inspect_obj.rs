//! Example: Load and inspect a Wavefront OBJ file.
//!
//! Run with: cargo run --example inspect_obj -- models/tallbox.obj

use std::env;

use prism_core::load_obj;

fn main() {
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        println!("Usage: inspect_obj <path-to-obj-file>");
        println!("\nExamples:");
        println!("  cargo run --example inspect_obj -- models/plane.obj");
        println!("  cargo run --example inspect_obj -- models/rock.obj");
        return;
    }

    let path = &args[1];
    println!("Loading OBJ file: {}", path);

    match load_obj(path) {
        Ok(mesh) => {
            println!("\n=== Mesh: {} ===", mesh.name);
            println!("Vertices: {}", mesh.vertices.len());
            println!("Triangles: {}", mesh.triangle_count());

            let bounds = mesh.bounds();
            println!(
                "Bounds: ({:.2}, {:.2}, {:.2}) to ({:.2}, {:.2}, {:.2})",
                bounds.min.x, bounds.min.y, bounds.min.z, bounds.max.x, bounds.max.y, bounds.max.z
            );

            println!("\n--- First triangles ---");
            for (i, [a, b, c]) in mesh.triangles().take(4).enumerate() {
                println!(
                    "  [{}] {:?} {:?} {:?} normal {:?}",
                    i, a.position, b.position, c.position, a.normal
                );
            }
        }
        Err(e) => {
            eprintln!("Error loading OBJ: {}", e);
            std::process::exit(1);
        }
    }
}
