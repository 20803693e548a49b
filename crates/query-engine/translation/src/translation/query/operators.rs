//! Handle range filters: objects of comparison operators such as `{ "gte": "10" }`.

use indexmap::IndexMap;

use query_engine_descriptor::descriptor::ast::{
    FilterValue, RangeClause, RangeOperand, RangeOperator,
};

use super::values;
use crate::translation::parameters::ParameterValue;

/// Translate an operator object into a range clause.
///
/// Unknown operators are dropped. When nothing usable is left the object is passed on
/// unchanged, to be read as an equality on the object itself.
pub fn translate_range(operators: &IndexMap<String, ParameterValue>) -> FilterValue {
    let clause: IndexMap<RangeOperator, RangeOperand> = operators
        .iter()
        .filter_map(|(name, value)| {
            let Some(operator) = RangeOperator::from_name(name) else {
                tracing::debug!(operator = name.as_str(), "dropping unknown range operator");
                return None;
            };
            translate_operand(operator, value).map(|operand| (operator, operand))
        })
        .collect();

    if clause.is_empty() {
        values::coerce(&ParameterValue::Object(operators.clone()))
    } else {
        FilterValue::Range(RangeClause(clause))
    }
}

/// Coerce the argument of one operator. Membership operators always get a list.
fn translate_operand(operator: RangeOperator, value: &ParameterValue) -> Option<RangeOperand> {
    match value {
        ParameterValue::Text(text) => {
            let scalar = values::coerce_number(text);
            if operator.takes_list() {
                Some(RangeOperand::List(vec![scalar]))
            } else {
                Some(RangeOperand::Scalar(scalar))
            }
        }
        ParameterValue::List(items) => Some(RangeOperand::List(
            items.iter().map(|item| values::coerce_number(item)).collect(),
        )),
        ParameterValue::Object(_) => {
            tracing::debug!(%operator, "dropping nested object operand");
            None
        }
    }
}
