use terrain_brush::brush::{self, PatchImage};
use terrain_brush::terrain::NoiseConfig;
use terrain_brush::{
    BrushRequest, CircleRequest, EllipseRequest, HeightMap, ModifierConfig, PatchRequest,
    TerrainModifier,
};

fn print_stats(label: &str, map: &HeightMap) {
    let (min, max) = map.min_max();
    println!("{}:", label);
    println!("  Min: {:.3}", min);
    println!("  Max: {:.3}", max);
    println!("  Avg: {:.3}", map.mean());
}

/// 最低单元格的世界坐标
fn lowest_point(map: &HeightMap) -> Option<[f32; 2]> {
    let size = map.size();
    let (index, _) = map
        .data()
        .iter()
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(b.1))?;
    Some(map.grid_to_world((index % size) as f32, (index / size) as f32))
}

fn main() {
    env_logger::init();

    let size = 256;
    let config = NoiseConfig::terrain().with_amplitude(10.0);
    println!("Generating {}x{} terrain (seed {})", size, size, config.seed);

    let mut map = HeightMap::from_noise(size, &config).with_world_extent([-50.0, -50.0], 100.0);
    print_stats("Initial height stats", &map);

    let modifier = TerrainModifier::new(ModifierConfig::default());

    let crater = CircleRequest::new([-20.0, -20.0], 0.08, 0.03, 4.0);
    if let Ok(kernel) = brush::circle(
        crater.outer_radius * size as f32,
        crater.inner_radius * size as f32,
        crater.weight,
        modifier.config().falloff,
    ) {
        println!(
            "Crater kernel: {}x{}, peak depth {:.2}, {} cells",
            kernel.rows(),
            kernel.cols(),
            kernel.peak(),
            kernel.support()
        );
    }

    // 5x5 的阶梯形图块
    let values: Vec<f32> = (0..25).map(|i| (i % 5) as f32 * 0.5).collect();
    let requests: Vec<BrushRequest> = vec![
        crater.into(),
        EllipseRequest::new([15.0, 10.0], 0.2, 0.05, 3.0)
            .with_inner(0.1, 0.02)
            .with_orientation(std::f32::consts::FRAC_PI_6)
            .into(),
        PatchRequest::new([30.0, -30.0], 0.3, PatchImage::from_f32(5, 5, &values)).into(),
    ];

    for request in &requests {
        let [x, y] = request.position();
        match modifier.modify(Some(&mut map), request) {
            Ok(footprint) => println!(
                "  {} at ({:.1}, {:.1}): {} cells",
                request.kind(),
                x,
                y,
                footprint.area()
            ),
            Err(err) => eprintln!("  {} at ({:.1}, {:.1}) failed: {}", request.kind(), x, y, err),
        }
    }

    print_stats("Modified height stats", &map);
    if let Some([x, y]) = lowest_point(&map) {
        println!("  Lowest point at ({:.1}, {:.1})", x, y);
    }
}
