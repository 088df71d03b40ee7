//! # Seed Data Generator
//!
//! Populates a fresh database with the shop's default menu and an admin
//! account.
//!
//! ## Usage
//! ```bash
//! # Seed the default development database
//! cargo run -p milktea-db --bin seed
//!
//! # Specify database path
//! cargo run -p milktea-db --bin seed -- --db ./data/milktea.db
//! ```
//!
//! ## Seeded Data
//! - 20 base milk tea drinks (35.000đ - 55.000đ)
//! - 24 toppings (8.000đ - 20.000đ)
//! - One admin account (`admin` / `admin123` — change it in production!)

use std::env;

use milktea_core::{MenuCategory, UserRole};
use milktea_db::{Database, DbConfig};

/// Default menu: (name, price in đồng, description).
const DRINKS: &[(&str, i64, &str)] = &[
    // Trà sữa kinh điển
    ("Trà sữa truyền thống", 35_000, "Trà sữa nguyên chất theo công thức truyền thống"),
    ("Trà sữa thai", 40_000, "Trà sữa kiểu Thai với vị đậm đà đặc trưng"),
    ("Trà sữa đường đen", 45_000, "Trà sữa với đường đen Taiwan thơm nồng"),
    ("Trà sữa matcha", 48_000, "Trà sữa matcha Nhật Bản cao cấp"),
    ("Trà sữa khoai môn", 42_000, "Trà sữa khoai môn tím béo ngậy"),
    // Trà sữa trái cây
    ("Trà sữa dâu", 44_000, "Trà sữa dâu tây tươi ngọt mát"),
    ("Trà sữa xoài", 46_000, "Trà sữa xoài cat chu ngọt thanh"),
    ("Trà sữa đào", 45_000, "Trà sữa đào tiên ngọt dịu"),
    ("Trà sữa việt quất", 50_000, "Trà sữa việt quất tươi giàu vitamin"),
    ("Trà sữa kiwi", 47_000, "Trà sữa kiwi chua ngọt sảng khoái"),
    // Trà sữa đặc biệt
    ("Trà sữa kem cheese", 55_000, "Trà sữa với lớp kem cheese mặn ngọt hấp dẫn"),
    ("Trà sữa chocolate", 49_000, "Trà sữa chocolate Bỉ thơm nồng"),
    ("Trà sữa caramel", 48_000, "Trà sữa caramel ngọt ngào quyến rũ"),
    ("Trà sữa hokkaido", 52_000, "Trà sữa Hokkaido Nhật Bản cao cấp"),
    ("Trà sữa okinawa", 50_000, "Trà sữa Okinawa với đường nâu đặc trưng"),
    // Trà sữa mới lạ
    ("Trà sữa lavender", 53_000, "Trà sữa hoa oải hương thơm dịu nhẹ"),
    ("Trà sữa yakult", 46_000, "Trà sữa yakult chua ngọt độc đáo"),
    ("Trà sữa dừa", 44_000, "Trà sữa dừa tươi mát lạnh"),
    ("Trà sữa oolong", 47_000, "Trà sữa oolong Đài Loan thơm nồng"),
    ("Trà sữa bạc hà", 45_000, "Trà sữa bạc hà mát lạnh sảng khoái"),
];

const TOPPINGS: &[(&str, i64, &str)] = &[
    // Trân châu
    ("Trân châu đen", 8_000, "Trân châu đen Taiwan dai ngon đặc trưng"),
    ("Trân châu trắng", 8_000, "Trân châu trắng mềm mịn trong suốt"),
    ("Trân châu hoàng kim", 12_000, "Trân châu hoàng kim cao cấp đặc biệt"),
    ("Trân châu sương mai", 10_000, "Trân châu sương mai trong suốt như ngọc trai"),
    ("Trân châu đường đen", 15_000, "Trân châu đường đen Taiwan ngọt đậm đà"),
    // Thạch
    ("Thạch cà phê", 10_000, "Thạch cà phê đắng nhẹ thơm lừng"),
    ("Thạch dừa", 9_000, "Thạch dừa tươi mát thanh nhiệt"),
    ("Thạch trái cây", 11_000, "Thạch trái cây nhiều màu sắc bắt mắt"),
    ("Thạch phô mai", 13_000, "Thạch phô mai mềm mịn béo ngậy"),
    ("Thạch rau câu", 8_000, "Thạch rau câu trong suốt mát lạnh"),
    // Kem & bánh
    ("Kem cheese", 18_000, "Lớp kem cheese mặn ngọt hấp dẫn"),
    ("Pudding", 14_000, "Pudding caramel mềm mịn thơm ngon"),
    ("Flan", 15_000, "Bánh flan caramel truyền thống"),
    ("Bánh tráng nướng", 12_000, "Bánh tráng nướng giòn rụm độc đáo"),
    // Hạt & đậu
    ("Đậu đỏ", 9_000, "Đậu đỏ bùi bùi ngọt thanh"),
    ("Đậu xanh", 9_000, "Đậu xanh mát lạnh giải nhiệt"),
    ("Hạt chia", 12_000, "Hạt chia siêu thực phẩm giàu dinh dưỡng"),
    ("Hạt sen", 11_000, "Hạt sen tươi bùi bùi thơm ngon"),
    ("Hạt điều", 16_000, "Hạt điều rang giòn thơm béo"),
    // Tươi mát
    ("Trái cây tươi", 20_000, "Trái cây tươi theo mùa đa dạng"),
    ("Nha đam", 10_000, "Nha đam tươi mát giải nhiệt thanh lọc"),
    ("Sương sáo", 9_000, "Sương sáo mát lạnh thanh nhiệt truyền thống"),
    ("Khoai môn tím", 12_000, "Khoai môn tím thái viên béo ngậy"),
    ("Jelly rainbow", 10_000, "Thạch jelly 7 màu sắc rực rỡ"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command line arguments
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./milktea_dev.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Milktea POS Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./milktea_dev.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Milktea POS Seed Data Generator");
    println!("==================================");
    println!("Database: {}", db_path);
    println!();

    let config = DbConfig::new(&db_path);
    let db = Database::new(config).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    // Refuse to double-seed
    let existing = db.menu().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} menu items", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    println!("Seeding menu...");

    let menu = db.menu();
    for (name, price, description) in DRINKS {
        menu.create(name, *price, MenuCategory::MilkTea, Some(description.to_string()))
            .await?;
    }
    for (name, price, description) in TOPPINGS {
        menu.create(name, *price, MenuCategory::Topping, Some(description.to_string()))
            .await?;
    }
    println!("✓ {} drinks, {} toppings", DRINKS.len(), TOPPINGS.len());

    if db.users().is_username_available("admin").await? {
        db.users()
            .create("admin", "admin123", "Quản trị viên", UserRole::Admin)
            .await?;
        println!("✓ Admin account created (admin / admin123)");
    }

    println!();
    println!("Done. {} menu items total.", db.menu().count().await?);

    Ok(())
}
