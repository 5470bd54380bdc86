//! Built-in battlefield layouts
//!
//! Each layout is registered in the `LAYOUTS` factory table under its key.

use crate::core::error::{NavError, Result};
use crate::core::types::TileCoord;
use crate::map::battlefield::Battlefield;
use crate::map::structure::Structure;
use crate::map::zone::{Zone, ZoneKind};
use crate::terrain::TerrainCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapLayout {
    UrbanDistrict,
    IndustrialZone,
    Riverside,
    OpenFields,
}

type LayoutBuilder = fn() -> Result<Battlefield>;

/// Factory table: key, layout, constructor
const LAYOUTS: [(&str, MapLayout, LayoutBuilder); 4] = [
    ("urban_district", MapLayout::UrbanDistrict, build_urban_district),
    ("industrial_zone", MapLayout::IndustrialZone, build_industrial_zone),
    ("riverside", MapLayout::Riverside, build_riverside),
    ("open_fields", MapLayout::OpenFields, build_open_fields),
];

impl MapLayout {
    pub const ALL: [MapLayout; 4] = [
        MapLayout::UrbanDistrict,
        MapLayout::IndustrialZone,
        MapLayout::Riverside,
        MapLayout::OpenFields,
    ];

    pub fn key(self) -> &'static str {
        LAYOUTS
            .iter()
            .find(|(_, layout, _)| *layout == self)
            .map(|(key, _, _)| *key)
            .unwrap_or("unknown")
    }

    pub fn from_name(name: &str) -> Result<Self> {
        LAYOUTS
            .iter()
            .find(|(key, _, _)| *key == name)
            .map(|(_, layout, _)| *layout)
            .ok_or_else(|| NavError::UnknownMap {
                name: name.to_string(),
                available: available_maps().join(", "),
            })
    }

    /// Construct a fresh battlefield for this layout
    pub fn build(self) -> Result<Battlefield> {
        let builder = LAYOUTS
            .iter()
            .find(|(_, layout, _)| *layout == self)
            .map(|(_, _, builder)| *builder)
            .ok_or_else(|| NavError::UnknownMap {
                name: format!("{:?}", self),
                available: available_maps().join(", "),
            })?;
        builder()
    }
}

/// Build a layout by its table key
pub fn build_map(name: &str) -> Result<Battlefield> {
    MapLayout::from_name(name)?.build()
}

pub fn available_maps() -> Vec<&'static str> {
    LAYOUTS.iter().map(|(key, _, _)| *key).collect()
}

fn tiles(points: &[(i32, i32)]) -> Vec<TileCoord> {
    points.iter().map(|&p| TileCoord::from(p)).collect()
}

fn paint(field: &mut Battlefield, points: &[(i32, i32)], terrain: TerrainCategory) {
    for &p in points {
        field.grid_mut().set_tile(TileCoord::from(p), terrain);
    }
}

fn spawn(x: i32, y: i32, w: i32, h: i32, team: &str) -> Zone {
    Zone::new(ZoneKind::Spawn, x, y, w, h).with("team", team)
}

fn named(kind: ZoneKind, x: i32, y: i32, w: i32, h: i32, name: &str) -> Zone {
    Zone::new(kind, x, y, w, h).with("name", name)
}

/// Dense city blocks around a north-south avenue
fn build_urban_district() -> Result<Battlefield> {
    let mut field = Battlefield::with_default_size("Urban District");
    let grid = field.grid_mut();
    grid.draw_road(&tiles(&[(15, 0), (15, 23)]), 3);
    grid.draw_road(&tiles(&[(0, 12), (29, 12)]), 2);

    field.add_structure(
        Structure::new("apt_west_1", 2, 2, 6, 5)
            .with_entry_points(&[(4, 6), (7, 4)])
            .with_name("West Apartments"),
    )?;
    field.add_structure(
        Structure::new("office_east", 20, 2, 7, 6)
            .with_entry_points(&[(20, 5), (23, 7)])
            .with_name("East Office"),
    )?;
    field.add_structure(
        Structure::new("warehouse_south", 3, 16, 8, 5)
            .with_entry_points(&[(6, 16), (10, 18)])
            .with_name("South Warehouse"),
    )?;
    field.add_structure(
        Structure::new("shop_ne_1", 22, 14, 4, 3)
            .with_entry_points(&[(22, 15)])
            .with_name("Corner Shop"),
    )?;
    field.add_structure(
        Structure::new("shop_ne_2", 22, 18, 5, 4)
            .with_entry_points(&[(22, 20)])
            .with_name("Market"),
    )?;

    paint(
        &mut field,
        &[
            (10, 5), (10, 6), (11, 5),
            (18, 8), (19, 8),
            (5, 10), (5, 11),
            (25, 10), (26, 10),
            (8, 14), (9, 14),
            (18, 18), (18, 19), (19, 18),
        ],
        TerrainCategory::LightCover,
    );
    paint(
        &mut field,
        &[(12, 3), (12, 4), (27, 8), (28, 8), (1, 14), (1, 15)],
        TerrainCategory::HeavyCover,
    );

    field.add_zone("player_spawn", spawn(1, 20, 4, 3, "player"))?;
    field.add_zone("enemy_spawn", spawn(25, 1, 4, 3, "enemy"))?;
    field.add_zone("objective_a", named(ZoneKind::Objective, 14, 10, 3, 3, "Town Square"))?;
    Ok(field)
}

/// Open yards with silos, a cooling pond and long sightlines
fn build_industrial_zone() -> Result<Battlefield> {
    let mut field = Battlefield::with_default_size("Industrial Zone");
    field
        .grid_mut()
        .draw_road(&tiles(&[(0, 6), (20, 6), (20, 18), (29, 18)]), 2);

    field.add_structure(
        Structure::new("factory_main", 1, 1, 10, 4)
            .with_entry_points(&[(5, 4), (10, 2)])
            .with_name("Main Factory"),
    )?;

    for (sx, sy) in [(14, 2), (17, 2), (14, 5), (17, 5)] {
        field.grid_mut().fill_rect(sx, sy, 2, 2, TerrainCategory::Impassable);
    }

    field.add_structure(
        Structure::new("warehouse_east", 22, 1, 6, 7)
            .with_entry_points(&[(22, 4), (25, 7)])
            .with_name("East Warehouse"),
    )?;
    field.add_structure(
        Structure::new("processing", 4, 14, 8, 6)
            .with_entry_points(&[(7, 14), (11, 17)])
            .with_name("Processing Plant"),
    )?;

    field.grid_mut().fill_rect(15, 12, 5, 4, TerrainCategory::Water);

    paint(
        &mut field,
        &[
            (12, 9), (13, 9), (12, 10),
            (23, 10), (24, 10), (25, 10),
            (1, 10), (2, 10),
            (18, 20), (19, 20), (20, 20),
            (8, 8), (8, 9),
        ],
        TerrainCategory::LightCover,
    );
    paint(
        &mut field,
        &[(26, 14), (27, 14), (26, 15), (3, 8), (4, 8)],
        TerrainCategory::HeavyCover,
    );

    field.add_zone("player_spawn", spawn(1, 8, 3, 4, "player"))?;
    field.add_zone("enemy_spawn", spawn(24, 14, 4, 4, "enemy"))?;
    field.add_zone("objective_a", named(ZoneKind::Objective, 14, 8, 4, 3, "Central Yard"))?;
    field.add_zone("extraction", named(ZoneKind::Extraction, 26, 20, 3, 3, "Extraction Point"))?;
    Ok(field)
}

/// A drifting river split by three bridges
fn build_riverside() -> Result<Battlefield> {
    let mut field = Battlefield::with_default_size("Riverside");
    let height = field.grid().height() as i32;
    for ty in 0..height {
        let river_x = 14 + ty / 6;
        field.grid_mut().fill_rect(river_x, ty, 3, 1, TerrainCategory::Water);
    }

    paint(
        &mut field,
        &[
            (14, 5), (15, 5), (16, 5),
            (15, 11), (16, 11), (17, 11),
            (16, 18), (17, 18), (18, 18),
        ],
        TerrainCategory::Road,
    );

    let grid = field.grid_mut();
    grid.draw_road(&tiles(&[(0, 5), (14, 5)]), 2);
    grid.draw_road(&tiles(&[(16, 5), (29, 5)]), 2);
    grid.draw_road(&tiles(&[(0, 11), (15, 11)]), 2);
    grid.draw_road(&tiles(&[(17, 11), (29, 11)]), 2);

    field.add_structure(
        Structure::new("house_w1", 2, 1, 5, 3)
            .with_entry_points(&[(4, 3)])
            .with_name("River House W1"),
    )?;
    field.add_structure(
        Structure::new("house_w2", 1, 14, 6, 4)
            .with_entry_points(&[(3, 14), (6, 16)])
            .with_name("River House W2"),
    )?;
    field.add_structure(
        Structure::new("bunker_w", 8, 8, 4, 3)
            .with_entry_points(&[(11, 9)])
            .with_name("West Bunker"),
    )?;
    field.add_structure(
        Structure::new("house_e1", 22, 1, 5, 4)
            .with_entry_points(&[(22, 3)])
            .with_name("River House E1"),
    )?;
    field.add_structure(
        Structure::new("compound_e", 20, 14, 7, 6)
            .with_entry_points(&[(20, 17), (24, 19)])
            .with_name("East Compound"),
    )?;

    paint(
        &mut field,
        &[
            (5, 7), (6, 7), (10, 3), (3, 20), (4, 20), (11, 15),
            (20, 7), (21, 7), (25, 9), (22, 21), (23, 21), (27, 3),
        ],
        TerrainCategory::LightCover,
    );
    paint(
        &mut field,
        &[
            (12, 4), (12, 5), (18, 5), (18, 6),
            (13, 10), (13, 11), (19, 11), (19, 12),
            (14, 17), (14, 18), (20, 18), (20, 19),
        ],
        TerrainCategory::HeavyCover,
    );

    field.add_zone("player_spawn", spawn(1, 8, 3, 4, "player"))?;
    field.add_zone("enemy_spawn", spawn(26, 8, 3, 4, "enemy"))?;
    field.add_zone("bridge_north", named(ZoneKind::Control, 14, 4, 3, 3, "North Bridge"))?;
    field.add_zone("bridge_center", named(ZoneKind::Control, 15, 10, 3, 3, "Center Bridge"))?;
    field.add_zone("bridge_south", named(ZoneKind::Control, 16, 17, 3, 3, "South Bridge"))?;
    Ok(field)
}

/// Wide fields ringed by roads, suited to vehicles
fn build_open_fields() -> Result<Battlefield> {
    let mut field = Battlefield::with_default_size("Open Fields");
    let grid = field.grid_mut();
    grid.draw_road(&tiles(&[(2, 2), (27, 2), (27, 21), (2, 21), (2, 2)]), 2);
    grid.draw_road(&tiles(&[(2, 11), (27, 11)]), 2);
    grid.draw_road(&tiles(&[(14, 2), (14, 21)]), 2);

    for (id, x, y, door, name) in [
        ("outpost_nw", 4, 4, (6, 5), "NW Outpost"),
        ("outpost_ne", 23, 4, (23, 5), "NE Outpost"),
        ("outpost_sw", 4, 17, (6, 18), "SW Outpost"),
        ("outpost_se", 23, 17, (23, 18), "SE Outpost"),
    ] {
        field.add_structure(
            Structure::new(id, x, y, 3, 3)
                .with_entry_points(&[door])
                .with_name(name),
        )?;
    }
    field.add_structure(
        Structure::new("central", 12, 9, 5, 5)
            .with_entry_points(&[(12, 11), (16, 11), (14, 9), (14, 13)])
            .with_name("Central Command"),
    )?;

    paint(
        &mut field,
        &[
            (8, 6), (9, 6), (20, 6), (21, 6),
            (8, 16), (9, 16), (20, 16), (21, 16),
            (6, 11), (7, 11), (22, 11), (23, 11),
            (14, 6), (14, 7), (14, 16), (14, 17),
        ],
        TerrainCategory::LightCover,
    );

    field.add_zone("player_spawn", spawn(1, 10, 2, 4, "player"))?;
    field.add_zone("enemy_spawn", spawn(27, 10, 2, 4, "enemy"))?;
    field.add_zone(
        "objective_center",
        named(ZoneKind::Objective, 13, 10, 3, 3, "Command Center"),
    )?;
    Ok(field)
}
