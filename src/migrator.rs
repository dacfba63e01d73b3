use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240101_000001_create_company_tables::Migration),
            Box::new(m20240101_000002_create_certifications_table::Migration),
            Box::new(m20240101_000003_create_pv_module_tables::Migration),
        ]
    }
}

#[derive(DeriveIden)]
enum Companies {
    Table,
    Id,
    LegalName,
    ShortName,
    HqCity,
    HqCountry,
    ParentCompanyId,
}

#[derive(DeriveIden)]
enum Manufacturers {
    Table,
    CompanyId,
    MfgExperience,
    MfgCapacityYr,
    Comments,
}

#[derive(DeriveIden)]
enum ManufacturerCountries {
    Table,
    ManufacturerId,
    CountryCode,
}

#[derive(DeriveIden)]
enum MfgActivities {
    Table,
    Id,
    Name,
    Comments,
}

#[derive(DeriveIden)]
enum ManufacturerMfgActivities {
    Table,
    ManufacturerId,
    MfgActivityId,
}

#[derive(DeriveIden)]
enum Certifications {
    Table,
    Id,
    BodyId,
    Standard,
    Version,
    Comments,
}

#[derive(DeriveIden)]
enum PvModules {
    Table,
    Id,
    ManufacturerId,
    ModelName,
    PMax,
    VSysMax,
    CellCount,
    CellType,
    DopingType,
    CellTech,
    IsBifacial,
    HasFrame,
    HasArcoat,
    Comments,
}

#[derive(DeriveIden)]
enum PvModuleCertifications {
    Table,
    PvModuleId,
    CertificationId,
}

#[derive(DeriveIden)]
enum PvModuleDatasheets {
    Table,
    Id,
    PvModuleId,
    YearPublished,
    PMaxStc,
    EffStc,
    VMpStc,
    IMpStc,
    VOcStc,
    IScStc,
    TempCoPMax,
    TempCoVOc,
    TempCoISc,
    Length,
    Width,
    Thickness,
    Weight,
}

/// Nullable `NUMERIC(6, places)` column.
fn decimal_col<T: IntoIden>(col: T, places: u32) -> ColumnDef {
    ColumnDef::new(col).decimal_len(6, places).null().to_owned()
}

mod m20240101_000001_create_company_tables {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000001_create_company_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Companies::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Companies::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Companies::LegalName).string_len(50).null())
                        .col(
                            ColumnDef::new(Companies::ShortName)
                                .string_len(20)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(Companies::HqCity).string_len(50).null())
                        .col(ColumnDef::new(Companies::HqCountry).string_len(2).null())
                        .col(ColumnDef::new(Companies::ParentCompanyId).integer().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_companies_parent_company")
                                .from(Companies::Table, Companies::ParentCompanyId)
                                .to(Companies::Table, Companies::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_companies_parent_company_id")
                        .table(Companies::Table)
                        .col(Companies::ParentCompanyId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(MfgActivities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(MfgActivities::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(MfgActivities::Name)
                                .string_len(50)
                                .not_null()
                                .unique_key(),
                        )
                        .col(ColumnDef::new(MfgActivities::Comments).text().null())
                        .to_owned(),
                )
                .await?;

            // One row per company that manufactures; shares the company id.
            manager
                .create_table(
                    Table::create()
                        .table(Manufacturers::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Manufacturers::CompanyId)
                                .integer()
                                .not_null()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Manufacturers::MfgExperience).text().null())
                        .col(decimal_col(Manufacturers::MfgCapacityYr, 3))
                        .col(ColumnDef::new(Manufacturers::Comments).text().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_manufacturers_company")
                                .from(Manufacturers::Table, Manufacturers::CompanyId)
                                .to(Companies::Table, Companies::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ManufacturerCountries::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ManufacturerCountries::ManufacturerId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ManufacturerCountries::CountryCode)
                                .string_len(2)
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(ManufacturerCountries::ManufacturerId)
                                .col(ManufacturerCountries::CountryCode),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_manufacturer_countries_manufacturer")
                                .from(
                                    ManufacturerCountries::Table,
                                    ManufacturerCountries::ManufacturerId,
                                )
                                .to(Manufacturers::Table, Manufacturers::CompanyId)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(ManufacturerMfgActivities::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(ManufacturerMfgActivities::ManufacturerId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(ManufacturerMfgActivities::MfgActivityId)
                                .integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(ManufacturerMfgActivities::ManufacturerId)
                                .col(ManufacturerMfgActivities::MfgActivityId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_manufacturer_mfg_activities_manufacturer")
                                .from(
                                    ManufacturerMfgActivities::Table,
                                    ManufacturerMfgActivities::ManufacturerId,
                                )
                                .to(Manufacturers::Table, Manufacturers::CompanyId)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_manufacturer_mfg_activities_activity")
                                .from(
                                    ManufacturerMfgActivities::Table,
                                    ManufacturerMfgActivities::MfgActivityId,
                                )
                                .to(MfgActivities::Table, MfgActivities::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                ManufacturerMfgActivities::Table.into_iden(),
                ManufacturerCountries::Table.into_iden(),
                Manufacturers::Table.into_iden(),
                MfgActivities::Table.into_iden(),
                Companies::Table.into_iden(),
            ] {
                manager
                    .drop_table(Table::drop().table(table).if_exists().to_owned())
                    .await?;
            }
            Ok(())
        }
    }
}

mod m20240101_000002_create_certifications_table {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000002_create_certifications_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Certifications::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(Certifications::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(Certifications::BodyId).integer().null())
                        .col(
                            ColumnDef::new(Certifications::Standard)
                                .string_len(20)
                                .not_null(),
                        )
                        .col(ColumnDef::new(Certifications::Version).string_len(10).null())
                        .col(ColumnDef::new(Certifications::Comments).text().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_certifications_body")
                                .from(Certifications::Table, Certifications::BodyId)
                                .to(Companies::Table, Companies::Id)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_certifications_body_id")
                        .table(Certifications::Table)
                        .col(Certifications::BodyId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(
                    Table::drop()
                        .table(Certifications::Table)
                        .if_exists()
                        .to_owned(),
                )
                .await
        }
    }
}

mod m20240101_000003_create_pv_module_tables {
    use super::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20240101_000003_create_pv_module_tables"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(PvModules::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PvModules::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(ColumnDef::new(PvModules::ManufacturerId).integer().not_null())
                        .col(ColumnDef::new(PvModules::ModelName).string_len(50).not_null())
                        .col(decimal_col(PvModules::PMax, 2))
                        .col(decimal_col(PvModules::VSysMax, 2))
                        .col(ColumnDef::new(PvModules::CellCount).integer().null())
                        .col(ColumnDef::new(PvModules::CellType).string_len(20).null())
                        .col(ColumnDef::new(PvModules::DopingType).string_len(20).null())
                        .col(ColumnDef::new(PvModules::CellTech).string_len(20).null())
                        .col(ColumnDef::new(PvModules::IsBifacial).boolean().null())
                        .col(ColumnDef::new(PvModules::HasFrame).boolean().null())
                        .col(ColumnDef::new(PvModules::HasArcoat).boolean().null())
                        .col(ColumnDef::new(PvModules::Comments).text().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_pv_modules_manufacturer")
                                .from(PvModules::Table, PvModules::ManufacturerId)
                                .to(Manufacturers::Table, Manufacturers::CompanyId)
                                .on_delete(ForeignKeyAction::Restrict),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_pv_modules_manufacturer_model")
                        .table(PvModules::Table)
                        .col(PvModules::ManufacturerId)
                        .col(PvModules::ModelName)
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PvModuleCertifications::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PvModuleCertifications::PvModuleId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PvModuleCertifications::CertificationId)
                                .integer()
                                .not_null(),
                        )
                        .primary_key(
                            Index::create()
                                .col(PvModuleCertifications::PvModuleId)
                                .col(PvModuleCertifications::CertificationId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_pv_module_certifications_module")
                                .from(
                                    PvModuleCertifications::Table,
                                    PvModuleCertifications::PvModuleId,
                                )
                                .to(PvModules::Table, PvModules::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_pv_module_certifications_certification")
                                .from(
                                    PvModuleCertifications::Table,
                                    PvModuleCertifications::CertificationId,
                                )
                                .to(Certifications::Table, Certifications::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_table(
                    Table::create()
                        .table(PvModuleDatasheets::Table)
                        .if_not_exists()
                        .col(
                            ColumnDef::new(PvModuleDatasheets::Id)
                                .integer()
                                .not_null()
                                .auto_increment()
                                .primary_key(),
                        )
                        .col(
                            ColumnDef::new(PvModuleDatasheets::PvModuleId)
                                .integer()
                                .not_null(),
                        )
                        .col(
                            ColumnDef::new(PvModuleDatasheets::YearPublished)
                                .integer()
                                .null(),
                        )
                        .col(decimal_col(PvModuleDatasheets::PMaxStc, 2))
                        .col(decimal_col(PvModuleDatasheets::EffStc, 2))
                        .col(decimal_col(PvModuleDatasheets::VMpStc, 2))
                        .col(decimal_col(PvModuleDatasheets::IMpStc, 2))
                        .col(decimal_col(PvModuleDatasheets::VOcStc, 2))
                        .col(decimal_col(PvModuleDatasheets::IScStc, 2))
                        .col(decimal_col(PvModuleDatasheets::TempCoPMax, 2))
                        .col(decimal_col(PvModuleDatasheets::TempCoVOc, 2))
                        .col(decimal_col(PvModuleDatasheets::TempCoISc, 2))
                        .col(decimal_col(PvModuleDatasheets::Length, 3))
                        .col(decimal_col(PvModuleDatasheets::Width, 3))
                        .col(decimal_col(PvModuleDatasheets::Thickness, 3))
                        .col(decimal_col(PvModuleDatasheets::Weight, 3))
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_pv_module_datasheets_module")
                                .from(PvModuleDatasheets::Table, PvModuleDatasheets::PvModuleId)
                                .to(PvModules::Table, PvModules::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_pv_module_datasheets_module")
                        .table(PvModuleDatasheets::Table)
                        .col(PvModuleDatasheets::PvModuleId)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            for table in [
                PvModuleDatasheets::Table.into_iden(),
                PvModuleCertifications::Table.into_iden(),
                PvModules::Table.into_iden(),
            ] {
                manager
                    .drop_table(Table::drop().table(table).if_exists().to_owned())
                    .await?;
            }
            Ok(())
        }
    }
}
