//! Seed data script - loads a small demonstration catalog
//!
//! Run with: cargo run --bin seed-data
//!
//! Everything goes through the service layer, so the usual validation and
//! decimal rescaling apply. Running it twice is a no-op.

use rust_decimal_macros::dec;
use std::sync::Arc;
use tracing::info;

use pvmodules_api::{
    config::load_config,
    db,
    handlers::AppServices,
    logging::plain_logger,
    services::{
        certifications::CertificationInput,
        companies::CompanyInput,
        datasheets::DatasheetInput,
        manufacturers::{ManufacturerInput, NewManufacturerInput},
        mfg_activities::MfgActivityInput,
        pv_modules::PvModuleInput,
    },
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    info!("=== PV Modules API Seed Data ===");

    let cfg = load_config()?;
    let pool = db::establish_connection_from_app_config(&cfg).await?;
    db::run_migrations(&pool).await?;

    // Synchronous drain: the process exits right after seeding.
    let services = AppServices::new(Arc::new(pool), plain_logger(std::io::stderr()));

    let (_, existing) = services
        .companies
        .list_companies(Some("AcmeCo"), 1, 1)
        .await?;
    if existing > 0 {
        info!("Catalog already seeded; nothing to do");
        return Ok(());
    }

    info!("Creating manufacturing activities...");
    let mut activity_ids = Vec::new();
    for name in ["Wafer", "Cell", "Module"] {
        let activity = services
            .mfg_activities
            .create_mfg_activity(MfgActivityInput {
                name: name.to_string(),
                comments: None,
            })
            .await?;
        activity_ids.push(activity.id);
    }

    info!("Creating certification body...");
    let lab = services
        .companies
        .create_company(CompanyInput {
            legal_name: Some("TUV Rheinland AG".into()),
            short_name: "TUV".into(),
            hq_city: Some("Cologne".into()),
            hq_country: Some("DE".into()),
            parent_company_id: None,
        })
        .await?;

    let mut certification_ids = Vec::new();
    for (standard, version) in [("IEC 61215", "2021"), ("IEC 61730", "2016")] {
        let record = services
            .certifications
            .create_certification(CertificationInput {
                body_id: Some(lab.id),
                standard: standard.into(),
                version: Some(version.into()),
                comments: None,
            })
            .await?;
        certification_ids.push(record.certification.id);
    }

    info!("Creating manufacturer...");
    let acme = services
        .manufacturers
        .create_manufacturer(NewManufacturerInput {
            company: CompanyInput {
                legal_name: Some("Acme Solar Co., Ltd.".into()),
                short_name: "AcmeCo".into(),
                hq_city: Some("Shanghai".into()),
                hq_country: Some("CN".into()),
                parent_company_id: None,
            },
            manufacturer: ManufacturerInput {
                mfg_experience: Some("Module assembly since 2008".into()),
                mfg_capacity_yr: Some(dec!(5)),
                mfg_country: vec!["CN".into(), "VN".into()],
                mfg_activity_ids: activity_ids,
                comments: None,
            },
        })
        .await?;

    info!("Creating modules and datasheets...");
    let module = services
        .pv_modules
        .create_pv_module(PvModuleInput {
            manufacturer_id: acme.company.id,
            model_name: "X1".into(),
            p_max: Some(dec!(310)),
            v_sys_max: Some(dec!(1500)),
            cell_count: Some(120),
            cell_type: Some("Mono_Si".into()),
            doping_type: Some("n_type".into()),
            cell_tech: Some("TOPCon".into()),
            is_bifacial: Some(true),
            has_frame: Some(true),
            has_arcoat: Some(true),
            certification_ids,
            comments: None,
        })
        .await?;

    for (year, p_max_stc) in [(2019, dec!(300.00)), (2021, dec!(305.00))] {
        services
            .datasheets
            .create_datasheet(DatasheetInput {
                pv_module_id: module.module.id,
                year_published: Some(year),
                p_max_stc: Some(p_max_stc),
                eff_stc: Some(dec!(21.3)),
                length: Some(dec!(1.722)),
                width: Some(dec!(1.134)),
                thickness: Some(dec!(0.030)),
                weight: Some(dec!(21.5)),
                ..Default::default()
            })
            .await?;
    }

    info!("Seed complete: manufacturer {} with module {}", acme.company.id, module.module.id);
    Ok(())
}
