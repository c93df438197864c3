//! # Frostline CLI Application
//!
//! Terminal-based front end for the refrigeration calculation engine.
//!
//! ## Status
//!
//! This is a thin demo driver: it prompts for a handful of room-load
//! inputs, runs one engine call, and prints the report plus its JSON
//! form. Richer front ends (web, MCP) talk to `frost_core` directly.

use std::io::{self, BufRead, Write};

use frost_core::calculations::room_load::{
    compute_room_load, DoorSpec, DoorType, RoomSpec, SurfaceSpec,
};
use frost_core::units::{BtuPerHr, TonsRefrigeration};

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn main() {
    println!("Frostline CLI - Refrigeration Design Calculator");
    println!("===============================================");
    println!();
    println!("Running room load demo...");
    println!();

    let length_ft = prompt_f64("Enter room length (ft) [50.0]: ", 50.0);
    let width_ft = prompt_f64("Enter room width (ft) [20.0]: ", 20.0);
    let height_ft = prompt_f64("Enter room height (ft) [20.0]: ", 20.0);
    let inside_temp_f = prompt_f64("Enter inside temperature (F) [-10.0]: ", -10.0);
    let outside_temp_f = prompt_f64("Enter outside temperature (F) [85.0]: ", 85.0);
    let door_area_ft2 = prompt_f64("Enter door area (ft2) [100.0]: ", 100.0);

    // Envelope from the box dimensions (assume one U-value throughout)
    let wall_area_ft2 = 2.0 * (length_ft + width_ft) * height_ft;
    let plan_area_ft2 = length_ft * width_ft;

    let spec = RoomSpec {
        label: "CLI-Demo".to_string(),
        length_ft,
        width_ft,
        height_ft,
        inside_temp_f,
        outside_temp_f,
        surfaces: vec![
            SurfaceSpec {
                name: "Walls".to_string(),
                u_value: 0.035,
                area_ft2: wall_area_ft2,
                adjacent_temp_f: None,
            },
            SurfaceSpec {
                name: "Roof".to_string(),
                u_value: 0.03,
                area_ft2: plan_area_ft2,
                adjacent_temp_f: None,
            },
            SurfaceSpec {
                name: "Floor".to_string(),
                u_value: 0.05,
                area_ft2: plan_area_ft2,
                adjacent_temp_f: Some(55.0),
            },
        ],
        doors: vec![DoorSpec {
            name: "D-1".to_string(),
            area_ft2: door_area_ft2,
            open_hours_per_day: 2.0,
            door_type: if inside_temp_f < 32.0 {
                DoorType::Freezer
            } else {
                DoorType::Cooler
            },
        }],
        ..RoomSpec::default()
    };

    match compute_room_load(&spec) {
        Ok(result) => {
            println!("═══════════════════════════════════════");
            println!("  ROOM LOAD RESULTS");
            println!("═══════════════════════════════════════");
            println!();
            println!("Input:");
            println!(
                "  Room:    {:.0} x {:.0} x {:.0} ft ({:.0} ft3)",
                length_ft, width_ft, height_ft, result.volume_ft3
            );
            println!(
                "  Design:  {:.0} F inside / {:.0} F outside",
                inside_temp_f, outside_temp_f
            );
            println!();
            println!("Subtotals (BTU/day):");
            println!("  Transmission: {:>12.0}", result.transmission_btu_day);
            println!(
                "  Infiltration: {:>12.0} ({:.2} air changes/day)",
                result.infiltration_btu_day, result.air_changes_per_day
            );
            println!("  Doors:        {:>12.0}", result.door_btu_day);
            println!(
                "  Internal:     {:>12.0}",
                result.lighting_btu_day + result.occupancy_btu_day + result.equipment_btu_day
            );
            println!("  Product:      {:>12.0}", result.product_btu_day);
            println!();
            println!("Design Load:");
            println!("  Connected: {:.0} BTU/day", result.connected_total_btu_day);
            println!(
                "  +{:.0}% SF:   {:.0} BTU/day",
                result.safety_factor * 100.0,
                result.design_total_btu_day
            );
            let tons: TonsRefrigeration = BtuPerHr(result.required_capacity_btu_hr).into();
            println!(
                "  Capacity:  {:.0} BTU/hr = {:.2} TR over {:.0} run hours",
                result.required_capacity_btu_hr, tons.0, spec.run_hours_per_day
            );

            if !result.flags.is_empty() {
                println!();
                println!("Flags:");
                for flag in &result.flags {
                    println!("  {}", flag);
                }
            }

            println!();
            println!("JSON Output (for LLM/API use):");
            if let Ok(json) = serde_json::to_string_pretty(&result) {
                println!("{}", json);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if let Ok(json) = serde_json::to_string_pretty(&e) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
    }
}
