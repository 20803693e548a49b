//! Describe the queries handed to the data-access layer for a single request.

use std::sync::Arc;

use serde::Serialize;

use super::ast::{CompiledCountQuery, CompiledQuery, ConditionTree, OrderBy, Projection};

/// The result of compiling one request: the rows query and its paired count query.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QueryPlan {
    pub query: CompiledQuery,
    pub count: CompiledCountQuery,
    /// The 1-based page the rows query fetches.
    pub page: u64,
}

impl QueryPlan {
    /// The page size requested.
    pub fn limit(&self) -> u64 {
        self.query.take
    }
}

/// Build a plan where both queries share one condition tree.
pub fn simple_query_plan(
    conditions: ConditionTree,
    projection: Projection,
    ordering: OrderBy,
    page: u64,
    skip: u64,
    take: u64,
) -> QueryPlan {
    let conditions = Arc::new(conditions);
    QueryPlan {
        count: CompiledCountQuery {
            conditions: Arc::clone(&conditions),
        },
        query: CompiledQuery {
            conditions,
            projection,
            ordering,
            skip,
            take,
        },
        page,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ast::{FilterValue, OrderDirection};
    use crate::descriptor::helpers;

    #[test]
    fn both_queries_share_the_same_conditions() {
        let plan = simple_query_plan(
            helpers::field_condition("gender", FilterValue::Scalar("MALE".into())),
            helpers::empty_include(),
            helpers::order_by_field("createdAt", OrderDirection::Desc),
            1,
            0,
            10,
        );
        assert!(Arc::ptr_eq(&plan.query.conditions, &plan.count.conditions));
        insta::assert_json_snapshot!(plan, @r###"
        {
          "query": {
            "where": {
              "gender": "MALE"
            },
            "include": {},
            "orderBy": {
              "createdAt": "desc"
            },
            "skip": 0,
            "take": 10
          },
          "count": {
            "where": {
              "gender": "MALE"
            }
          },
          "page": 1
        }
        "###);
    }
}
