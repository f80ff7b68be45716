use rally_catalog::{PartCategory, list_cars, list_parts};
use rally_garage::Result;

pub fn handle_cars_command() -> Result<()> {
    println!("🏎️  Garage ({} cars)", list_cars().len());
    println!();
    println!(
        "{:<16} {:<32} {:>5} {:>5} {:>5} {:>5}  {}",
        "ID", "CAR", "SPD", "ACC", "HDL", "DUR", "PRICE"
    );
    for car in list_cars() {
        let [speed, acceleration, handling, durability] = car.specs.values();
        println!(
            "{:<16} {:<32} {:>5} {:>5} {:>5} {:>5}  {}",
            car.id,
            car.label(),
            speed,
            acceleration,
            handling,
            durability,
            car.price
        );
    }
    Ok(())
}

pub fn handle_parts_command(category: Option<PartCategory>) -> Result<()> {
    let categories: Vec<PartCategory> = match category {
        Some(category) => vec![category],
        None => PartCategory::ALL.to_vec(),
    };

    for category in categories {
        println!("🔧 {}", category);
        for part in list_parts(Some(category)) {
            println!(
                "   {:<20} T{} {:<28} {:<36} {}",
                part.id,
                part.tier,
                part.name,
                part.boost.to_string(),
                part.price
            );
        }
        println!();
    }
    Ok(())
}
