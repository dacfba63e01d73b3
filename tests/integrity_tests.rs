//! Referential actions, uniqueness and ordering at the service layer.

mod common;

use assert_matches::assert_matches;
use common::TestApp;
use pvmodules_api::{
    dto::{DatasheetResponse, ManufacturerResponse},
    errors::ServiceError,
    services::{
        certifications::CertificationInput,
        companies::CompanyInput,
        datasheets::DatasheetInput,
        manufacturers::{ManufacturerInput, NewManufacturerInput},
        mfg_activities::MfgActivityInput,
        pv_modules::PvModuleInput,
    },
};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn company(short_name: &str) -> CompanyInput {
    CompanyInput {
        short_name: short_name.to_string(),
        ..Default::default()
    }
}

fn module(manufacturer_id: i32, model_name: &str) -> PvModuleInput {
    PvModuleInput {
        manufacturer_id,
        model_name: model_name.to_string(),
        ..Default::default()
    }
}

fn datasheet(pv_module_id: i32, year: i32, p_max_stc: Decimal) -> DatasheetInput {
    DatasheetInput {
        pv_module_id,
        year_published: Some(year),
        p_max_stc: Some(p_max_stc),
        ..Default::default()
    }
}

async fn manufacturer(app: &TestApp, short_name: &str) -> i32 {
    app.services()
        .manufacturers
        .create_manufacturer(NewManufacturerInput {
            company: company(short_name),
            manufacturer: ManufacturerInput::default(),
        })
        .await
        .expect("create manufacturer")
        .company
        .id
}

#[tokio::test]
async fn acme_x1_datasheets_list_highest_power_first() {
    let app = TestApp::new().await;
    let services = app.services();

    let acme = services
        .companies
        .create_company(company("AcmeCo"))
        .await
        .unwrap();
    let record = services
        .manufacturers
        .extend_company(
            acme.id,
            ManufacturerInput {
                mfg_capacity_yr: Some(dec!(5.000)),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    let view = ManufacturerResponse::from(record);
    assert_eq!(view.mfg_capacity_yr.map(|d| d.to_string()), Some("5.000".into()));

    let x1 = services
        .pv_modules
        .create_pv_module(PvModuleInput {
            p_max: Some(dec!(310.00)),
            ..module(acme.id, "X1")
        })
        .await
        .unwrap();
    let x1_id = x1.module.id;

    services
        .datasheets
        .create_datasheet(datasheet(x1_id, 2019, dec!(300.00)))
        .await
        .unwrap();
    services
        .datasheets
        .create_datasheet(datasheet(x1_id, 2021, dec!(305.00)))
        .await
        .unwrap();

    let detail = services
        .catalog
        .get_pv_module_with_datasheets(x1_id)
        .await
        .unwrap();
    assert_eq!(detail.pv_module.manufacturer_short_name, "AcmeCo");

    let listed: Vec<(String, Option<i32>)> = detail
        .datasheets
        .into_iter()
        .map(DatasheetResponse::from)
        .map(|d| (d.p_max_stc.map(|p| p.to_string()).unwrap_or_default(), d.year_published))
        .collect();
    assert_eq!(
        listed,
        vec![
            ("305.00".to_string(), Some(2021)),
            ("300.00".to_string(), Some(2019)),
        ]
    );
}

#[tokio::test]
async fn datasheets_sort_by_rated_power_descending() {
    let app = TestApp::new().await;
    let services = app.services();
    let maker = manufacturer(&app, "SortCo").await;
    let m = services
        .pv_modules
        .create_pv_module(module(maker, "M"))
        .await
        .unwrap()
        .module
        .id;

    for p in [dec!(310.00), dec!(305.50), dec!(320.00)] {
        services
            .datasheets
            .create_datasheet(datasheet(m, 2020, p))
            .await
            .unwrap();
    }
    // Unrated revision goes last.
    services
        .datasheets
        .create_datasheet(DatasheetInput {
            pv_module_id: m,
            ..Default::default()
        })
        .await
        .unwrap();

    let detail = services.catalog.get_pv_module_with_datasheets(m).await.unwrap();
    let powers: Vec<Option<Decimal>> = detail.datasheets.iter().map(|d| d.p_max_stc).collect();
    assert_eq!(
        powers,
        vec![Some(dec!(320.00)), Some(dec!(310.00)), Some(dec!(305.50)), None]
    );

    let (admin_list, total) = services
        .datasheets
        .list_datasheets(Some(m), 1, 10)
        .await
        .unwrap();
    assert_eq!(total, 4);
    assert_eq!(admin_list[0].p_max_stc, Some(dec!(320.00)));
}

#[tokio::test]
async fn duplicate_short_name_is_rejected() {
    let app = TestApp::new().await;
    let companies = &app.services().companies;

    companies.create_company(company("AcmeCo")).await.unwrap();
    let err = companies
        .create_company(company("AcmeCo"))
        .await
        .unwrap_err();
    assert_matches!(err, ServiceError::ValidationError(_));
    assert!(err.is_invalid_field("short_name"));

    // A manufacturer shares the company namespace.
    let err = app
        .services()
        .manufacturers
        .create_manufacturer(NewManufacturerInput {
            company: company("AcmeCo"),
            manufacturer: ManufacturerInput::default(),
        })
        .await
        .unwrap_err();
    assert!(err.is_invalid_field("short_name"));

    let (_, total) = companies.list_companies(None, 1, 10).await.unwrap();
    assert_eq!(total, 1);
}

#[tokio::test]
async fn renaming_to_own_short_name_is_allowed() {
    let app = TestApp::new().await;
    let companies = &app.services().companies;
    let acme = companies.create_company(company("AcmeCo")).await.unwrap();

    let updated = companies
        .update_company(
            acme.id,
            CompanyInput {
                legal_name: Some("Acme Corporation".into()),
                ..company("AcmeCo")
            },
        )
        .await
        .unwrap();
    assert_eq!(updated.legal_name.as_deref(), Some("Acme Corporation"));
}

#[tokio::test]
async fn deleting_parent_clears_child_reference() {
    let app = TestApp::new().await;
    let companies = &app.services().companies;

    let parent = companies.create_company(company("Parent")).await.unwrap();
    let child = companies
        .create_company(CompanyInput {
            parent_company_id: Some(parent.id),
            ..company("Child")
        })
        .await
        .unwrap();

    companies.delete_company(parent.id).await.unwrap();

    let child = companies.get_company(child.id).await.unwrap();
    assert_eq!(child.parent_company_id, None);
    assert_matches!(
        companies.get_company(parent.id).await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn company_cannot_parent_itself() {
    let app = TestApp::new().await;
    let companies = &app.services().companies;
    let acme = companies.create_company(company("AcmeCo")).await.unwrap();

    let err = companies
        .update_company(
            acme.id,
            CompanyInput {
                parent_company_id: Some(acme.id),
                ..company("AcmeCo")
            },
        )
        .await
        .unwrap_err();
    assert!(err.is_invalid_field("parent_company_id"));
}

#[tokio::test]
async fn manufacturer_with_modules_is_protected() {
    let app = TestApp::new().await;
    let services = app.services();
    let maker = manufacturer(&app, "AcmeCo").await;
    let x1 = services
        .pv_modules
        .create_pv_module(module(maker, "X1"))
        .await
        .unwrap();

    let err = services
        .manufacturers
        .delete_manufacturer(maker)
        .await
        .unwrap_err();
    assert_matches!(
        err,
        ServiceError::ReferentialIntegrity { ref blocking, count: 1, .. } if blocking == "pv module(s)"
    );

    // Same rule through the company entry point.
    let err = services.companies.delete_company(maker).await.unwrap_err();
    assert_matches!(err, ServiceError::ReferentialIntegrity { .. });

    let still_there = services.manufacturers.get_manufacturer(maker).await.unwrap();
    assert_eq!(still_there.company.short_name, "AcmeCo");
    let module = services.pv_modules.get_pv_module(x1.module.id).await.unwrap();
    assert_eq!(module.module.manufacturer_id, maker);
}

#[tokio::test]
async fn certification_body_is_protected() {
    let app = TestApp::new().await;
    let services = app.services();
    let lab = services.companies.create_company(company("TUV")).await.unwrap();
    let cert = services
        .certifications
        .create_certification(CertificationInput {
            body_id: Some(lab.id),
            standard: "IEC 61215".into(),
            version: Some("2021".into()),
            comments: None,
        })
        .await
        .unwrap();

    let err = services.companies.delete_company(lab.id).await.unwrap_err();
    assert_matches!(
        err,
        ServiceError::ReferentialIntegrity { ref blocking, .. } if blocking == "certification(s)"
    );

    services
        .certifications
        .delete_certification(cert.certification.id)
        .await
        .unwrap();
    services.companies.delete_company(lab.id).await.unwrap();
}

#[tokio::test]
async fn deleting_module_cascades_to_datasheets() {
    let app = TestApp::new().await;
    let services = app.services();
    let maker = manufacturer(&app, "AcmeCo").await;
    let x1 = services
        .pv_modules
        .create_pv_module(module(maker, "X1"))
        .await
        .unwrap()
        .module
        .id;

    let mut ids = Vec::new();
    for (year, p) in [(2019, dec!(300)), (2020, dec!(302.5)), (2021, dec!(305))] {
        ids.push(
            services
                .datasheets
                .create_datasheet(datasheet(x1, year, p))
                .await
                .unwrap()
                .id,
        );
    }

    services.pv_modules.delete_pv_module(x1).await.unwrap();

    for id in ids {
        assert_matches!(
            services.datasheets.get_datasheet(id).await,
            Err(ServiceError::NotFound(_))
        );
        assert_matches!(
            services.catalog.get_datasheet(x1, id).await,
            Err(ServiceError::NotFound(_))
        );
    }

    // With its devices gone the manufacturer can be removed.
    services.manufacturers.delete_manufacturer(maker).await.unwrap();
}

#[tokio::test]
async fn cell_type_blank_unknown_and_invalid_are_distinct() {
    let app = TestApp::new().await;
    let services = app.services();
    let maker = manufacturer(&app, "AcmeCo").await;

    let err = services
        .pv_modules
        .create_pv_module(PvModuleInput {
            cell_type: Some("Quantum".into()),
            ..module(maker, "Bad")
        })
        .await
        .unwrap_err();
    assert!(err.is_invalid_field("cell_type"));

    let blank = services
        .pv_modules
        .create_pv_module(PvModuleInput {
            cell_type: Some("".into()),
            ..module(maker, "Blank")
        })
        .await
        .unwrap();
    let unknown = services
        .pv_modules
        .create_pv_module(PvModuleInput {
            cell_type: Some("Unknown".into()),
            ..module(maker, "Unknown")
        })
        .await
        .unwrap();
    let absent = services
        .pv_modules
        .create_pv_module(module(maker, "Absent"))
        .await
        .unwrap();

    assert_eq!(blank.module.cell_type.as_deref(), Some(""));
    assert_eq!(unknown.module.cell_type.as_deref(), Some("Unknown"));
    assert_eq!(absent.module.cell_type, None);

    let (blank_only, total) = services
        .pv_modules
        .list_pv_modules(None, Some(""), 1, 10)
        .await
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(blank_only[0].model_name, "Blank");
}

#[tokio::test]
async fn precision_overflow_names_the_field() {
    let app = TestApp::new().await;
    let services = app.services();
    let maker = manufacturer(&app, "AcmeCo").await;

    let err = services
        .pv_modules
        .create_pv_module(PvModuleInput {
            p_max: Some(dec!(10000.00)),
            ..module(maker, "TooBig")
        })
        .await
        .unwrap_err();
    assert!(err.is_invalid_field("p_max"));

    let x1 = services
        .pv_modules
        .create_pv_module(module(maker, "X1"))
        .await
        .unwrap()
        .module
        .id;
    let err = services
        .datasheets
        .create_datasheet(DatasheetInput {
            length: Some(dec!(1.7225)),
            ..datasheet(x1, 2021, dec!(305))
        })
        .await
        .unwrap_err();
    assert!(err.is_invalid_field("length"));

    // Nothing was written by the failed attempts.
    let (_, total) = services.datasheets.list_datasheets(Some(x1), 1, 10).await.unwrap();
    assert_eq!(total, 0);
    let (_, modules) = services.pv_modules.list_pv_modules(None, None, 1, 10).await.unwrap();
    assert_eq!(modules, 1);
}

#[tokio::test]
async fn module_index_orders_by_manufacturer_then_model() {
    let app = TestApp::new().await;
    let services = app.services();
    let zeta = manufacturer(&app, "Zeta").await;
    let acme = manufacturer(&app, "AcmeCo").await;

    for (maker, name) in [(zeta, "A100"), (acme, "X2"), (acme, "X1")] {
        services
            .pv_modules
            .create_pv_module(module(maker, name))
            .await
            .unwrap();
    }

    let labels: Vec<String> = services
        .catalog
        .list_pv_modules(None)
        .await
        .unwrap()
        .iter()
        .map(|summary| summary.label())
        .collect();
    assert_eq!(labels, vec!["AcmeCo X1", "AcmeCo X2", "Zeta A100"]);

    let first = services.catalog.list_pv_modules(Some(1)).await.unwrap();
    assert_eq!(first.len(), 1);
}

#[tokio::test]
async fn manufacturer_detail_lists_devices_and_profile() {
    let app = TestApp::new().await;
    let services = app.services();
    let cell = services
        .mfg_activities
        .create_mfg_activity(MfgActivityInput {
            name: "Cell".into(),
            comments: None,
        })
        .await
        .unwrap();
    let module_activity = services
        .mfg_activities
        .create_mfg_activity(MfgActivityInput {
            name: "Module".into(),
            comments: None,
        })
        .await
        .unwrap();

    let record = services
        .manufacturers
        .create_manufacturer(NewManufacturerInput {
            company: CompanyInput {
                hq_country: Some(" cn ".into()),
                ..company("AcmeCo")
            },
            manufacturer: ManufacturerInput {
                mfg_country: vec!["vn".into(), "CN".into(), "VN".into()],
                mfg_activity_ids: vec![module_activity.id, cell.id, cell.id],
                ..Default::default()
            },
        })
        .await
        .unwrap();
    assert_eq!(record.company.hq_country.as_deref(), Some("CN"));
    assert_eq!(record.mfg_country, vec!["CN", "VN"]);

    let maker = record.company.id;
    for name in ["X2", "X1"] {
        services
            .pv_modules
            .create_pv_module(module(maker, name))
            .await
            .unwrap();
    }

    let detail = services
        .catalog
        .get_manufacturer_with_devices(maker)
        .await
        .unwrap();
    let names: Vec<&str> = detail.devices.iter().map(|d| d.model_name.as_str()).collect();
    assert_eq!(names, vec!["X1", "X2"]);
    let activities: Vec<&str> = detail
        .manufacturer
        .mfg_activities
        .iter()
        .map(|a| a.name.as_str())
        .collect();
    assert_eq!(activities, vec!["Cell", "Module"]);

    let (rows, _) = services
        .manufacturers
        .list_manufacturers(None, 1, 10)
        .await
        .unwrap();
    assert_eq!(rows[0].mfg_activities, "Cell, Module");

    // Deleting an activity only unlinks it.
    services
        .mfg_activities
        .delete_mfg_activity(cell.id)
        .await
        .unwrap();
    let record = services.manufacturers.get_manufacturer(maker).await.unwrap();
    assert_eq!(record.mfg_activities.len(), 1);
}

#[tokio::test]
async fn extending_a_manufacturer_twice_fails() {
    let app = TestApp::new().await;
    let services = app.services();
    let maker = manufacturer(&app, "AcmeCo").await;

    let err = services
        .manufacturers
        .extend_company(maker, ManufacturerInput::default())
        .await
        .unwrap_err();
    assert!(err.is_invalid_field("company_id"));

    assert_matches!(
        services
            .manufacturers
            .extend_company(9_999, ManufacturerInput::default())
            .await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn unknown_references_are_validation_errors() {
    let app = TestApp::new().await;
    let services = app.services();

    let err = services
        .pv_modules
        .create_pv_module(module(42, "Orphan"))
        .await
        .unwrap_err();
    assert!(err.is_invalid_field("manufacturer_id"));

    let err = services
        .datasheets
        .create_datasheet(datasheet(42, 2021, dec!(300)))
        .await
        .unwrap_err();
    assert!(err.is_invalid_field("pv_module_id"));

    let maker = manufacturer(&app, "AcmeCo").await;
    let err = services
        .pv_modules
        .create_pv_module(PvModuleInput {
            certification_ids: vec![7],
            ..module(maker, "X1")
        })
        .await
        .unwrap_err();
    assert!(err.is_invalid_field("certification_ids"));
}

#[tokio::test]
async fn datasheet_lookup_requires_matching_module() {
    let app = TestApp::new().await;
    let services = app.services();
    let maker = manufacturer(&app, "AcmeCo").await;
    let x1 = services
        .pv_modules
        .create_pv_module(module(maker, "X1"))
        .await
        .unwrap()
        .module
        .id;
    let x2 = services
        .pv_modules
        .create_pv_module(module(maker, "X2"))
        .await
        .unwrap()
        .module
        .id;
    let sheet = services
        .datasheets
        .create_datasheet(datasheet(x1, 2021, dec!(305)))
        .await
        .unwrap();

    assert!(services.catalog.get_datasheet(x1, sheet.id).await.is_ok());
    assert_matches!(
        services.catalog.get_datasheet(x2, sheet.id).await,
        Err(ServiceError::NotFound(_))
    );
}

#[tokio::test]
async fn certifications_list_by_body_standard_then_newest_version() {
    let app = TestApp::new().await;
    let companies = &app.services().companies;
    let tuv = companies.create_company(company("TUV")).await.unwrap().id;
    let csa = companies.create_company(company("CSA")).await.unwrap().id;

    let certify = |body_id: Option<i32>, standard: &str, version: Option<&str>| CertificationInput {
        body_id,
        standard: standard.to_string(),
        version: version.map(str::to_string),
        ..Default::default()
    };
    for input in [
        certify(Some(tuv), "IEC 61215", Some("2016")),
        certify(None, "IEC 62108", Some("2016")),
        certify(Some(tuv), "IEC 61730", None),
        certify(Some(csa), "UL 61730", Some("2017")),
        certify(Some(tuv), "IEC 61215", Some("2021")),
        certify(Some(tuv), "IEC 61730", Some("2016")),
    ] {
        app.services()
            .certifications
            .create_certification(input)
            .await
            .expect("create certification");
    }

    let (records, total) = app
        .services()
        .certifications
        .list_certifications(None, 1, 10)
        .await
        .unwrap();
    assert_eq!(total, 6);
    let listed: Vec<(Option<&str>, &str, Option<&str>)> = records
        .iter()
        .map(|r| {
            (
                r.body_short_name.as_deref(),
                r.certification.standard.as_str(),
                r.certification.version.as_deref(),
            )
        })
        .collect();
    assert_eq!(
        listed,
        vec![
            (Some("CSA"), "UL 61730", Some("2017")),
            (Some("TUV"), "IEC 61215", Some("2021")),
            (Some("TUV"), "IEC 61215", Some("2016")),
            (Some("TUV"), "IEC 61730", Some("2016")),
            (Some("TUV"), "IEC 61730", None),
            (None, "IEC 62108", Some("2016")),
        ]
    );
}

#[tokio::test]
async fn companies_list_by_short_name_across_pages() {
    let app = TestApp::new().await;
    let companies = &app.services().companies;
    for name in ["Zeta", "Beta", "Gamma", "Alpha"] {
        companies.create_company(company(name)).await.unwrap();
    }

    let (first, total) = companies.list_companies(None, 1, 2).await.unwrap();
    let (second, _) = companies.list_companies(None, 2, 2).await.unwrap();
    assert_eq!(total, 4);

    let names: Vec<&str> = first
        .iter()
        .chain(second.iter())
        .map(|c| c.short_name.as_str())
        .collect();
    assert_eq!(names, vec!["Alpha", "Beta", "Gamma", "Zeta"]);
}

#[tokio::test]
async fn unique_violation_at_write_time_names_the_field() {
    use pvmodules_api::entities::company as company_entity;
    use sea_orm::{ActiveModelTrait, DbErr, Set};

    let app = TestApp::new().await;
    let db = &*app.state.db;
    let row = || company_entity::ActiveModel {
        short_name: Set("AcmeCo".to_string()),
        ..Default::default()
    };
    row().insert(db).await.expect("first insert");
    let err = row().insert(db).await.expect_err("second insert must hit the unique key");

    let mapped = ServiceError::unique_field(err, "short_name", "already taken");
    assert!(mapped.is_invalid_field("short_name"));
    assert_eq!(mapped.status_code(), axum::http::StatusCode::BAD_REQUEST);

    let other = ServiceError::unique_field(DbErr::Custom("disk full".into()), "short_name", "taken");
    assert_matches!(other, ServiceError::DatabaseError(_));
}

#[tokio::test]
async fn text_widths_apply_after_trimming() {
    let app = TestApp::new().await;
    let companies = &app.services().companies;

    let twenty = "A".repeat(20);
    let created = companies
        .create_company(company(&format!("  {}  ", twenty)))
        .await
        .expect("padded 20-character short name fits");
    assert_eq!(created.short_name, twenty);

    let err = companies
        .create_company(company(&"B".repeat(21)))
        .await
        .unwrap_err();
    assert!(err.is_invalid_field("short_name"));

    let err = companies.create_company(company("   ")).await.unwrap_err();
    assert!(err.is_invalid_field("short_name"));

    let maker = manufacturer(&app, "AcmeCo").await;
    let fifty = "M".repeat(50);
    let record = app
        .services()
        .pv_modules
        .create_pv_module(module(maker, &format!(" {} ", fifty)))
        .await
        .expect("padded 50-character model name fits");
    assert_eq!(record.module.model_name, fifty);

    let activity = app
        .services()
        .mfg_activities
        .create_mfg_activity(MfgActivityInput {
            name: format!("\t{}\n", "W".repeat(50)),
            ..Default::default()
        })
        .await
        .expect("padded activity name fits");
    assert_eq!(activity.name.len(), 50);
}
