// ==========================================
// EventExtractor 引擎集成测试
// ==========================================
// 测试目标: 验证宽表时间戳列 → 升序事件序列重建
// 覆盖范围: 列序无关性 / 同刻并列裁决 / 行级异常恢复
// ==========================================

use shipment_flow::domain::quality::QualityCollector;
use shipment_flow::domain::Location;
use shipment_flow::{EventExtractor, LocationRegistry, RawShipmentRecord};

// ==========================================
// 测试辅助函数
// ==========================================

/// 创建测试用的位置注册表(两仓一站)
fn create_test_registry() -> LocationRegistry {
    LocationRegistry::new(vec![
        Location::warehouse("Warehouse-A"),
        Location::warehouse("Warehouse-B"),
        Location::site("Site-X"),
    ])
    .unwrap()
}

/// 创建测试用的货件记录
fn create_test_record(item_id: &str, cells: Vec<(&str, &str)>) -> RawShipmentRecord {
    RawShipmentRecord {
        item_id: item_id.to_string(),
        location_cells: cells
            .into_iter()
            .map(|(location, cell)| (location.to_string(), cell.to_string()))
            .collect(),
        current_location: None,
        package_count: None,
        row_number: 1,
    }
}

// ==========================================
// 测试用例 1: 列顺序无关的时间排序
// ==========================================

#[test]
fn test_ordering_regardless_of_column_order() {
    println!("\n=== 测试：列顺序无关的时间排序 ===");

    let extractor = EventExtractor::new();
    let registry = create_test_registry();

    // 同一组时间戳,三种列排列
    let permutations = vec![
        vec![
            ("Warehouse-A", "2024-01-05"),
            ("Warehouse-B", "2024-01-10"),
            ("Site-X", "2024-01-20"),
        ],
        vec![
            ("Site-X", "2024-01-20"),
            ("Warehouse-A", "2024-01-05"),
            ("Warehouse-B", "2024-01-10"),
        ],
        vec![
            ("Warehouse-B", "2024-01-10"),
            ("Site-X", "2024-01-20"),
            ("Warehouse-A", "2024-01-05"),
        ],
    ];

    for (i, cells) in permutations.into_iter().enumerate() {
        let mut quality = QualityCollector::new();
        let record = create_test_record(&format!("ITEM{:03}", i), cells);
        let journey = extractor.extract(&record, &registry, &mut quality);

        let path: Vec<&str> = journey.events.iter().map(|e| e.location.as_str()).collect();
        assert_eq!(
            path,
            vec!["Warehouse-A", "Warehouse-B", "Site-X"],
            "排列 {} 必须得到相同事件顺序",
            i
        );
    }
}

// ==========================================
// 测试用例 2: 同刻并列的确定性裁决
// ==========================================

#[test]
fn test_tie_break_deterministic_across_runs() {
    println!("\n=== 测试：同刻并列的确定性裁决 ===");

    let extractor = EventExtractor::new();
    let registry = create_test_registry();

    // 三个位置同一时刻到达
    let cells = vec![
        ("Site-X", "2024-01-05 08:00:00"),
        ("Warehouse-B", "2024-01-05 08:00:00"),
        ("Warehouse-A", "2024-01-05 08:00:00"),
    ];

    let mut first_path: Option<Vec<String>> = None;
    for _run in 0..10 {
        let mut quality = QualityCollector::new();
        let record = create_test_record("ITEM_TIE", cells.clone());
        let journey = extractor.extract(&record, &registry, &mut quality);

        let path: Vec<String> = journey.events.iter().map(|e| e.location.clone()).collect();
        // 规范序: 仓库优先,同类字典序
        assert_eq!(path, vec!["Warehouse-A", "Warehouse-B", "Site-X"]);

        match &first_path {
            None => first_path = Some(path),
            Some(expected) => assert_eq!(&path, expected, "重复运行必须得到相同顺序"),
        }
    }
}

// ==========================================
// 测试用例 3: 行级异常恢复
// ==========================================

#[test]
fn test_malformed_cells_recovered_locally() {
    println!("\n=== 测试：行级异常恢复 ===");

    let extractor = EventExtractor::new();
    let registry = create_test_registry();
    let mut quality = QualityCollector::new();

    let record = create_test_record(
        "ITEM_BAD",
        vec![
            ("Warehouse-A", "not-a-date"),
            ("Warehouse-B", "2024/01/10"), // 不支持的格式
            ("Site-X", "2024-01-20"),
        ],
    );
    let journey = extractor.extract(&record, &registry, &mut quality);

    // 两个坏单元格按缺失处理,好单元格照常
    assert_eq!(journey.events.len(), 1);
    assert_eq!(journey.events[0].location, "Site-X");

    let report = quality.into_report();
    assert_eq!(report.summary.malformed_timestamps, 2);
    assert_eq!(report.violations.len(), 2);
}

// ==========================================
// 测试用例 4: 尚未移动与直送站点
// ==========================================

#[test]
fn test_empty_and_direct_to_site_journeys() {
    println!("\n=== 测试：尚未移动与直送站点 ===");

    let extractor = EventExtractor::new();
    let registry = create_test_registry();

    // 全空 → 空序列(合法)
    let mut quality = QualityCollector::new();
    let record = create_test_record("ITEM_EMPTY", vec![]);
    let journey = extractor.extract(&record, &registry, &mut quality);
    assert!(journey.events.is_empty());
    assert!(quality.violations().is_empty());

    // 仅站点一列 → 单事件序列(直送,零跳)
    let mut quality = QualityCollector::new();
    let record = create_test_record("ITEM_DIRECT", vec![("Site-X", "2024-01-20")]);
    let journey = extractor.extract(&record, &registry, &mut quality);
    assert_eq!(journey.events.len(), 1);
    assert_eq!(
        journey.events[0].kind,
        shipment_flow::LocationKind::Site
    );
}
