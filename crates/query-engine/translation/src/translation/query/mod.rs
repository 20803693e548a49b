//! Translate the parameters of a list request into a query plan.

pub mod fields;
pub mod filtering;
pub mod operators;
pub mod pagination;
pub mod relationships;
pub mod search;
pub mod sorting;
pub mod values;

use query_engine_descriptor::descriptor::helpers;
use query_engine_descriptor::descriptor::plan::{simple_query_plan, QueryPlan};
use query_engine_metadata::metadata::{Metadata, QueryConfig};

use crate::translation::error::Error;
use crate::translation::helpers::Env;
use crate::translation::parameters::QueryParameters;

/// Translate the parameters of a request into a rows query and a count query
/// that share the same conditions.
pub fn translate(config: &QueryConfig, parameters: &QueryParameters) -> Result<QueryPlan, Error> {
    let env = Env::new(config);

    let conditions = search::translate_search(&env, parameters, helpers::empty_conditions())?;
    let conditions = filtering::translate_filters(&env, parameters, conditions)?;
    let pagination = pagination::translate_pagination(&env, parameters);
    let ordering = sorting::translate_order_by(&env, parameters)?;
    let projection = fields::translate_projection(&env, parameters);

    let plan = simple_query_plan(
        conditions,
        projection,
        ordering,
        pagination.page,
        pagination.skip,
        pagination.limit,
    );
    tracing::debug!("Query plan: {:?}", plan);
    Ok(plan)
}

/// Translate a request against one of the configured entities.
pub fn translate_for_entity(
    metadata: &Metadata,
    entity: &str,
    parameters: &QueryParameters,
) -> Result<QueryPlan, Error> {
    let config = metadata
        .lookup_entity(entity)
        .ok_or_else(|| Error::EntityNotFound(entity.to_string()))?;
    translate(config, parameters)
}
