use property_registry::{
    database::{DatabaseManager as _, entities::UnitType},
    summary::property_space_summary,
    test_utils::{
        TestServerBuilder, create_test_meter, create_test_property_space, create_test_unit,
        utc_date,
    },
};

#[tokio::test]
async fn test_reading_spanning_two_years_counted_in_both() {
    let server = TestServerBuilder::new().build().await;
    let db = &server.database;

    let space = create_test_property_space(db, "Winter Crossing", "12 Frost Ln").await;
    let unit = create_test_unit(db, space, "Unit A", UnitType::Leased, 200.0).await;
    create_test_meter(
        db,
        "MTR-SPAN",
        700.0,
        utc_date(2021, 12, 15),
        utc_date(2022, 1, 15),
        &[unit],
    )
    .await;

    let dao = db.property_spaces();

    for year in [2021, 2022] {
        let relations = dao.load_related(space, Some(year)).await.unwrap().unwrap();
        let summary = property_space_summary(relations);
        assert_eq!(
            summary.total_consumption, 700.0,
            "reading should be counted for year {}",
            year
        );
    }

    let relations = dao.load_related(space, Some(2020)).await.unwrap().unwrap();
    let summary = property_space_summary(relations);
    assert_eq!(summary.total_consumption, 0.0);

    let relations = dao.load_related(space, Some(2023)).await.unwrap().unwrap();
    let summary = property_space_summary(relations);
    assert_eq!(summary.total_consumption, 0.0);
}

#[tokio::test]
async fn test_meter_shared_across_property_spaces_splits_evenly() {
    let server = TestServerBuilder::new().build().await;
    let db = &server.database;

    let space_a = create_test_property_space(db, "North Tower", "1 North St").await;
    let unit_a = create_test_unit(db, space_a, "Unit A", UnitType::Leased, 500.0).await;

    let space_b = create_test_property_space(db, "South Tower", "2 South St").await;
    let unit_b = create_test_unit(db, space_b, "Unit B", UnitType::Leased, 400.0).await;

    // One meter serving a unit in each tower
    create_test_meter(
        db,
        "MTR-SHARED",
        1000.0,
        utc_date(2022, 1, 1),
        utc_date(2022, 12, 31),
        &[unit_a, unit_b],
    )
    .await;

    let dao = db.property_spaces();

    let summary_a =
        property_space_summary(dao.load_related(space_a, None).await.unwrap().unwrap());
    assert_eq!(summary_a.total_consumption, 500.0);
    assert_eq!(summary_a.total_area, 500.0);
    assert_eq!(summary_a.number_of_units, 1);

    let summary_b =
        property_space_summary(dao.load_related(space_b, None).await.unwrap().unwrap());
    assert_eq!(summary_b.total_consumption, 500.0);
}

#[tokio::test]
async fn test_in_space_shared_meter_sums_to_full_reading() {
    let server = TestServerBuilder::new().build().await;
    let db = &server.database;

    let space = create_test_property_space(db, "Shared Services", "9 Hub Rd").await;
    let unit_a = create_test_unit(db, space, "Unit A", UnitType::Leased, 100.0).await;
    let unit_b = create_test_unit(db, space, "Unit B", UnitType::Leased, 100.0).await;
    let unit_c = create_test_unit(db, space, "Unit C", UnitType::CommonArea, 50.0).await;

    create_test_meter(
        db,
        "MTR-LOBBY",
        900.0,
        utc_date(2022, 1, 1),
        utc_date(2022, 12, 31),
        &[unit_a, unit_b, unit_c],
    )
    .await;

    let dao = db.property_spaces();
    let summary = property_space_summary(dao.load_related(space, None).await.unwrap().unwrap());

    // 3 shares of 300 each, never 900 per unit
    assert_eq!(summary.total_consumption, 900.0);
    assert_eq!(summary.number_of_units, 3);
}

#[tokio::test]
async fn test_share_count_ignores_year_filter() {
    let server = TestServerBuilder::new().build().await;
    let db = &server.database;

    let space = create_test_property_space(db, "Annex", "3 Side St").await;
    let unit_a = create_test_unit(db, space, "Unit A", UnitType::Leased, 100.0).await;

    let other = create_test_property_space(db, "Main Building", "4 Side St").await;
    let unit_b = create_test_unit(db, other, "Unit B", UnitType::Leased, 100.0).await;

    create_test_meter(
        db,
        "MTR-X",
        600.0,
        utc_date(2022, 3, 1),
        utc_date(2022, 10, 1),
        &[unit_a, unit_b],
    )
    .await;

    let dao = db.property_spaces();
    let relations = dao.load_related(space, Some(2022)).await.unwrap().unwrap();
    let summary = property_space_summary(relations);

    // The year filter narrows which readings appear, not how many units
    // share them.
    assert_eq!(summary.total_consumption, 300.0);
}

#[tokio::test]
async fn test_units_and_area_ignore_year_filter() {
    let server = TestServerBuilder::new().build().await;
    let db = &server.database;

    let space = create_test_property_space(db, "Quiet Block", "5 Still Rd").await;
    create_test_unit(db, space, "Unit A", UnitType::Vacant, 250.0).await;
    create_test_unit(db, space, "Unit B", UnitType::Leased, 150.0).await;

    let dao = db.property_spaces();
    let relations = dao.load_related(space, Some(1999)).await.unwrap().unwrap();
    let summary = property_space_summary(relations);

    assert_eq!(summary.number_of_units, 2);
    assert_eq!(summary.total_area, 400.0);
    assert_eq!(summary.total_consumption, 0.0);
}

#[tokio::test]
async fn test_list_related_orders_by_id() {
    let server = TestServerBuilder::new().build().await;
    let db = &server.database;

    let first = create_test_property_space(db, "First", "1 Main St").await;
    let second = create_test_property_space(db, "Second", "2 Main St").await;
    let third = create_test_property_space(db, "Third", "3 Main St").await;

    let dao = db.property_spaces();
    let all = dao.list_related(None).await.unwrap();

    let ids: Vec<i32> = all.iter().map(|r| r.space.id).collect();
    assert_eq!(ids, vec![first, second, third]);
}

#[tokio::test]
async fn test_load_related_missing_space_is_none() {
    let server = TestServerBuilder::new().build().await;

    let dao = server.database.property_spaces();
    assert!(dao.load_related(42, None).await.unwrap().is_none());
}

#[tokio::test]
async fn test_delete_keeps_meter_rows_but_drops_links() {
    let server = TestServerBuilder::new().build().await;
    let db = &server.database;

    let space_a = create_test_property_space(db, "Gone Soon", "6 Fleeting Ave").await;
    let unit_a = create_test_unit(db, space_a, "Unit A", UnitType::Leased, 100.0).await;

    let space_b = create_test_property_space(db, "Still Here", "7 Lasting Ave").await;
    let unit_b = create_test_unit(db, space_b, "Unit B", UnitType::Leased, 100.0).await;

    let meter_id = create_test_meter(
        db,
        "MTR-KEEP",
        800.0,
        utc_date(2022, 1, 1),
        utc_date(2022, 12, 31),
        &[unit_a, unit_b],
    )
    .await;

    let dao = db.property_spaces();
    dao.delete(space_a).await.unwrap();

    // The reading survives and is now exclusive to the remaining unit.
    let meter = db.meter_data().find_by_id(meter_id).await.unwrap();
    assert!(meter.is_some());

    let summary =
        property_space_summary(dao.load_related(space_b, None).await.unwrap().unwrap());
    assert_eq!(summary.total_consumption, 800.0);
}

#[tokio::test]
async fn test_negative_unit_area_rejected() {
    let server = TestServerBuilder::new().build().await;
    let db = &server.database;

    let space = create_test_property_space(db, "Odd Plot", "8 Strange St").await;
    let result = db
        .unit_spaces()
        .create(space, "Unit A", UnitType::Leased, -10.0)
        .await;

    assert!(result.is_err());
}
