use crate::database::entities::{UnitSpaceRecord, UnitType, unit_spaces};
use crate::database::{DatabaseError, DatabaseResult};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set,
};

/// Unit spaces DAO for database operations
#[derive(Clone)]
pub struct UnitSpacesDao {
    db: DatabaseConnection,
}

impl UnitSpacesDao {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Create a unit space under a property space
    pub async fn create(
        &self,
        property_space_id: i32,
        name: &str,
        unit_type: UnitType,
        area: f64,
    ) -> DatabaseResult<i32> {
        if !area.is_finite() || area < 0.0 {
            return Err(DatabaseError::Constraint(format!(
                "unit area must be a non-negative number, got {}",
                area
            )));
        }

        let unit = unit_spaces::ActiveModel {
            id: ActiveValue::NotSet,
            name: Set(name.to_string()),
            unit_type: Set(unit_type),
            area: Set(area),
            property_space_id: Set(property_space_id),
        }
        .insert(&self.db)
        .await
        .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(unit.id)
    }

    /// Find a unit space by ID
    pub async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<UnitSpaceRecord>> {
        let unit = unit_spaces::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(unit)
    }

    /// List the unit spaces of a property space, id-ascending
    pub async fn find_by_property_space(
        &self,
        property_space_id: i32,
    ) -> DatabaseResult<Vec<UnitSpaceRecord>> {
        let units = unit_spaces::Entity::find()
            .filter(unit_spaces::Column::PropertySpaceId.eq(property_space_id))
            .order_by_asc(unit_spaces::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| DatabaseError::Database(e.to_string()))?;

        Ok(units)
    }
}
