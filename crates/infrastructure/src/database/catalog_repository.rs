use async_trait::async_trait;
use domain::{
    CatalogRef, CatalogRepository, Country, CountryId, Dataset, DatasetId, DomainError, Language,
    LanguageId, NewCountry, NewDataset, NewLanguage, NewNewsSite, NewTagCategory, NewsSite,
    NewsSiteId, TagCategory, TagCategoryId,
};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, RelationTrait, Set,
};
use tracing::{debug, info};

use super::entities::{countries, datasets, languages, news_sites, tag_categories};
use super::error::{StorageFailure, classify, finish_delete, missing, storage_error};
use super::lookup::{country_exists, language_exists};

pub struct SeaOrmCatalogRepository {
    db: DatabaseConnection,
}

impl SeaOrmCatalogRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn existing_language(&self, new: &NewLanguage) -> Result<Option<LanguageId>, DomainError> {
        let rows = languages::Entity::find()
            .filter(
                Condition::any()
                    .add(languages::Column::Name.eq(new.name.as_str()))
                    .add(languages::Column::Code.eq(new.code.as_str())),
            )
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        let rows: Vec<Language> = rows.into_iter().map(Language::from).collect();
        resolve_existing(&rows, |l| new.matches(l), |l| l.id, || {
            format!(
                "language ({}, {}) collides with an existing language",
                new.name, new.code
            )
        })
    }

    async fn existing_country(&self, new: &NewCountry) -> Result<Option<CountryId>, DomainError> {
        let rows = countries::Entity::find()
            .filter(
                Condition::any()
                    .add(countries::Column::Name.eq(new.name.as_str()))
                    .add(countries::Column::Code.eq(new.code.as_str())),
            )
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        let rows: Vec<Country> = rows.into_iter().map(Country::from).collect();
        resolve_existing(&rows, |c| new.matches(c), |c| c.id, || {
            format!(
                "country ({}, {}, {}) collides with an existing country",
                new.name, new.code, new.language_id
            )
        })
    }

    async fn existing_news_site(
        &self,
        new: &NewNewsSite,
    ) -> Result<Option<NewsSiteId>, DomainError> {
        let rows = news_sites::Entity::find()
            .filter(
                Condition::any()
                    .add(news_sites::Column::Name.eq(new.name.as_str()))
                    .add(news_sites::Column::Code.eq(new.code.as_str())),
            )
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        let rows: Vec<NewsSite> = rows.into_iter().map(NewsSite::from).collect();
        resolve_existing(&rows, |s| new.matches(s), |s| s.id, || {
            format!(
                "news site ({}, {}, {}) collides with an existing site",
                new.name, new.code, new.country_id
            )
        })
    }

    async fn existing_dataset(&self, new: &NewDataset) -> Result<Option<DatasetId>, DomainError> {
        let row = datasets::Entity::find()
            .filter(datasets::Column::Name.eq(new.name.as_str()))
            .one(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(row.map(|m| DatasetId::new(m.id)))
    }

    async fn existing_tag_category(
        &self,
        new: &NewTagCategory,
    ) -> Result<Option<TagCategoryId>, DomainError> {
        let row = tag_categories::Entity::find()
            .filter(tag_categories::Column::CategoryName.eq(new.name.as_str()))
            .one(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(row.map(|m| TagCategoryId::new(m.id)))
    }
}

/// An upsert may reuse a row only when every unique column and the parent
/// agree; a partial match is a caller bug and must not be overwritten.
fn resolve_existing<T, I>(
    rows: &[T],
    matches: impl Fn(&T) -> bool,
    id: impl Fn(&T) -> I,
    conflict: impl FnOnce() -> String,
) -> Result<Option<I>, DomainError> {
    match rows {
        [] => Ok(None),
        [row] if matches(row) => Ok(Some(id(row))),
        _ => Err(DomainError::ConflictingUniqueValue(conflict())),
    }
}

/// Settles an insert that lost a race against a concurrent writer by
/// re-reading the winner's row
fn lost_race<I>(
    err: DbErr,
    parent: impl std::fmt::Display,
    reread: Result<Option<I>, DomainError>,
    conflict: impl FnOnce() -> String,
) -> Result<I, DomainError> {
    match classify(err) {
        StorageFailure::UniqueViolation(_) => {
            reread?.ok_or_else(|| DomainError::ConflictingUniqueValue(conflict()))
        }
        StorageFailure::ForeignKeyViolation(_) => Err(missing(parent)),
        StorageFailure::Other(e) => Err(e),
    }
}

#[async_trait]
impl CatalogRepository for SeaOrmCatalogRepository {
    async fn upsert_language(&self, language: &NewLanguage) -> Result<LanguageId, DomainError> {
        if let Some(id) = self.existing_language(language).await? {
            debug!(%id, "Language already present");
            return Ok(id);
        }

        let model = languages::ActiveModel {
            name: Set(language.name.clone()),
            code: Set(language.code.clone()),
            ..Default::default()
        };

        match languages::Entity::insert(model).exec(&self.db).await {
            Ok(res) => {
                let id = LanguageId::new(res.last_insert_id);
                info!(%id, name = %language.name, code = %language.code, "Language created");
                Ok(id)
            }
            Err(err) => {
                let reread = self.existing_language(language).await;
                lost_race(err, "language", reread, || {
                    format!("language ({}, {})", language.name, language.code)
                })
            }
        }
    }

    async fn upsert_country(&self, country: &NewCountry) -> Result<CountryId, DomainError> {
        if !language_exists(&self.db, country.language_id).await? {
            return Err(missing(country.language_id));
        }

        if let Some(id) = self.existing_country(country).await? {
            debug!(%id, "Country already present");
            return Ok(id);
        }

        let model = countries::ActiveModel {
            name: Set(country.name.clone()),
            code: Set(country.code.clone()),
            language_id: Set(country.language_id.get()),
            ..Default::default()
        };

        match countries::Entity::insert(model).exec(&self.db).await {
            Ok(res) => {
                let id = CountryId::new(res.last_insert_id);
                info!(%id, name = %country.name, code = %country.code, "Country created");
                Ok(id)
            }
            Err(err) => {
                let reread = self.existing_country(country).await;
                lost_race(err, country.language_id, reread, || {
                    format!("country ({}, {})", country.name, country.code)
                })
            }
        }
    }

    async fn upsert_news_site(&self, site: &NewNewsSite) -> Result<NewsSiteId, DomainError> {
        if !country_exists(&self.db, site.country_id).await? {
            return Err(missing(site.country_id));
        }

        if let Some(id) = self.existing_news_site(site).await? {
            debug!(%id, "News site already present");
            return Ok(id);
        }

        let model = news_sites::ActiveModel {
            name: Set(site.name.clone()),
            code: Set(site.code.clone()),
            country_id: Set(site.country_id.get()),
            ..Default::default()
        };

        match news_sites::Entity::insert(model).exec(&self.db).await {
            Ok(res) => {
                let id = NewsSiteId::new(res.last_insert_id);
                info!(%id, name = %site.name, code = %site.code, "News site created");
                Ok(id)
            }
            Err(err) => {
                let reread = self.existing_news_site(site).await;
                lost_race(err, site.country_id, reread, || {
                    format!("news site ({}, {})", site.name, site.code)
                })
            }
        }
    }

    async fn upsert_dataset(&self, dataset: &NewDataset) -> Result<DatasetId, DomainError> {
        if let Some(id) = self.existing_dataset(dataset).await? {
            return Ok(id);
        }

        let model = datasets::ActiveModel {
            name: Set(dataset.name.clone()),
            ..Default::default()
        };

        match datasets::Entity::insert(model).exec(&self.db).await {
            Ok(res) => {
                let id = DatasetId::new(res.last_insert_id);
                info!(%id, name = %dataset.name, "Dataset created");
                Ok(id)
            }
            Err(err) => {
                let reread = self.existing_dataset(dataset).await;
                lost_race(err, "dataset", reread, || format!("dataset {}", dataset.name))
            }
        }
    }

    async fn upsert_tag_category(
        &self,
        category: &NewTagCategory,
    ) -> Result<TagCategoryId, DomainError> {
        if let Some(id) = self.existing_tag_category(category).await? {
            return Ok(id);
        }

        let model = tag_categories::ActiveModel {
            category_name: Set(category.name.clone()),
            ..Default::default()
        };

        match tag_categories::Entity::insert(model).exec(&self.db).await {
            Ok(res) => {
                let id = TagCategoryId::new(res.last_insert_id);
                info!(%id, name = %category.name, "Tag category created");
                Ok(id)
            }
            Err(err) => {
                let reread = self.existing_tag_category(category).await;
                lost_race(err, "tag category", reread, || {
                    format!("tag category {}", category.name)
                })
            }
        }
    }

    async fn find_language(&self, id: LanguageId) -> Result<Option<Language>, DomainError> {
        let model = languages::Entity::find_by_id(id.get())
            .one(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(model.map(Language::from))
    }

    async fn find_country(&self, id: CountryId) -> Result<Option<Country>, DomainError> {
        let model = countries::Entity::find_by_id(id.get())
            .one(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(model.map(Country::from))
    }

    async fn find_news_site(&self, id: NewsSiteId) -> Result<Option<NewsSite>, DomainError> {
        let model = news_sites::Entity::find_by_id(id.get())
            .one(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(model.map(NewsSite::from))
    }

    async fn find_dataset(&self, id: DatasetId) -> Result<Option<Dataset>, DomainError> {
        let model = datasets::Entity::find_by_id(id.get())
            .one(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(model.map(Dataset::from))
    }

    async fn find_tag_category(
        &self,
        id: TagCategoryId,
    ) -> Result<Option<TagCategory>, DomainError> {
        let model = tag_categories::Entity::find_by_id(id.get())
            .one(&self.db)
            .await
            .map_err(storage_error)?;
        Ok(model.map(TagCategory::from))
    }

    async fn list_countries(&self) -> Result<Vec<Country>, DomainError> {
        let models = countries::Entity::find()
            .order_by_asc(countries::Column::Name)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(models.into_iter().map(Country::from).collect())
    }

    async fn news_sites_for_country(
        &self,
        country_code: &str,
    ) -> Result<Vec<NewsSite>, DomainError> {
        use sea_orm::JoinType;

        let models = news_sites::Entity::find()
            // Join news_sites -> countries
            .join(JoinType::InnerJoin, news_sites::Relation::Country.def())
            .filter(countries::Column::Code.eq(country_code))
            .order_by_asc(news_sites::Column::Name)
            .all(&self.db)
            .await
            .map_err(storage_error)?;

        Ok(models.into_iter().map(NewsSite::from).collect())
    }

    async fn delete(&self, entry: CatalogRef) -> Result<(), DomainError> {
        let result = match entry {
            CatalogRef::Language(id) => {
                languages::Entity::delete_by_id(id.get())
                    .exec(&self.db)
                    .await
            }
            CatalogRef::Country(id) => {
                countries::Entity::delete_by_id(id.get())
                    .exec(&self.db)
                    .await
            }
            CatalogRef::NewsSite(id) => {
                news_sites::Entity::delete_by_id(id.get())
                    .exec(&self.db)
                    .await
            }
            CatalogRef::Dataset(id) => datasets::Entity::delete_by_id(id.get()).exec(&self.db).await,
            CatalogRef::TagCategory(id) => {
                tag_categories::Entity::delete_by_id(id.get())
                    .exec(&self.db)
                    .await
            }
        };

        finish_delete(result, entry)?;
        info!(%entry, "Catalog entry deleted");
        Ok(())
    }
}
