//! The closed catalog of rewrite rules that a step can be tagged with.
//!
//! Downstream renderers key on the string form of each tag, so [`ChangeType::as_str`] must stay
//! stable.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Generates the [`ChangeType`] enum, along with its string conversions.
macro_rules! change_types {
    ($($(#[$attr:meta])* $variant:ident => $tag:literal),* $(,)?) => {
        /// The rewrite rule applied by a step.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        #[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
        pub enum ChangeType {
            $($(#[$attr])* $variant,)*
        }

        impl ChangeType {
            /// Every tag in the catalog, in declaration order.
            pub const ALL: &'static [ChangeType] = &[$(ChangeType::$variant,)*];

            /// Returns the catalog tag of this rule, such as `SIMPLIFY_ARITHMETIC`.
            pub fn as_str(self) -> &'static str {
                match self {
                    $(ChangeType::$variant => $tag,)*
                }
            }

            /// Looks up a rule by its catalog tag.
            pub fn from_tag(tag: &str) -> Option<Self> {
                match tag {
                    $($tag => Some(ChangeType::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

change_types! {
    /// Sentinel: nothing changed.
    NoChange => "NO_CHANGE",

    // arithmetic
    SimplifyArithmetic => "SIMPLIFY_ARITHMETIC",
    DivisionByZero => "DIVISION_BY_ZERO",

    // basic identities
    RearrangeCoeff => "REARRANGE_COEFF",
    ReduceExponentByZero => "REDUCE_EXPONENT_BY_ZERO",
    ReduceZeroNumerator => "REDUCE_ZERO_NUMERATOR",
    RemoveAddingZero => "REMOVE_ADDING_ZERO",
    RemoveExponentByOne => "REMOVE_EXPONENT_BY_ONE",
    RemoveExponentBaseOne => "REMOVE_EXPONENT_BASE_ONE",
    RemoveMultiplyingByNegativeOne => "REMOVE_MULTIPLYING_BY_NEGATIVE_ONE",
    MultiplyByZero => "MULTIPLY_BY_ZERO",
    RemoveMultiplyingByOne => "REMOVE_MULTIPLYING_BY_ONE",
    ResolveDoubleMinus => "RESOLVE_DOUBLE_MINUS",
    RemoveDividingByOne => "REMOVE_DIVIDING_BY_ONE",
    DivisionByNegativeOne => "DIVISION_BY_NEGATIVE_ONE",

    // division chains
    MultiplyByInverse => "MULTIPLY_BY_INVERSE",
    SimplifyDivision => "SIMPLIFY_DIVISION",

    // fractions
    AddFractions => "ADD_FRACTIONS",
    AddNumerators => "ADD_NUMERATORS",
    CancelMinuses => "CANCEL_MINUSES",
    CancelTerms => "CANCEL_TERMS",
    CommonDenominator => "COMMON_DENOMINATOR",
    ConvertIntegerToFraction => "CONVERT_INTEGER_TO_FRACTION",
    DivideFractionForAddition => "DIVIDE_FRACTION_FOR_ADDITION",
    MultiplyDenominators => "MULTIPLY_DENOMINATORS",
    MultiplyFractions => "MULTIPLY_FRACTIONS",
    MultiplyNumerators => "MULTIPLY_NUMERATORS",
    SimplifyFraction => "SIMPLIFY_FRACTION",
    SimplifySigns => "SIMPLIFY_SIGNS",
    FindGcd => "FIND_GCD",
    CancelGcd => "CANCEL_GCD",
    BreakUpFraction => "BREAK_UP_FRACTION",

    // like terms
    AddCoefficientOfOne => "ADD_COEFFICIENT_OF_ONE",
    AddExponentOfOne => "ADD_EXPONENT_OF_ONE",
    AddPolynomialTerms => "ADD_POLYNOMIAL_TERMS",
    CollectPolynomialExponents => "COLLECT_POLYNOMIAL_EXPONENTS",
    CollectLikeTerms => "COLLECT_LIKE_TERMS",
    CollectAndCombineLikeTerms => "COLLECT_AND_COMBINE_LIKE_TERMS",
    GroupCoefficients => "GROUP_COEFFICIENTS",
    MultiplyPolynomialTerms => "MULTIPLY_POLYNOMIAL_TERMS",
    UnaryMinusToNegativeOne => "UNARY_MINUS_TO_NEGATIVE_ONE",

    // distribution
    Distribute => "DISTRIBUTE",
    DistributeNegativeOne => "DISTRIBUTE_NEGATIVE_ONE",
    DistributeExponent => "DISTRIBUTE_EXPONENT",
    SimplifyTerms => "SIMPLIFY_TERMS",
    ExpandExponent => "EXPAND_EXPONENT",

    // functions
    AbsoluteValue => "ABSOLUTE_VALUE",
    CancelExponent => "CANCEL_EXPONENT",
    CancelExponentAndRoot => "CANCEL_EXPONENT_AND_ROOT",
    CancelRoot => "CANCEL_ROOT",
    CombineUnderRoot => "COMBINE_UNDER_ROOT",
    ConvertMultiplicationToExponent => "CONVERT_MULTIPLICATION_TO_EXPONENT",
    DistributeNthRoot => "DISTRIBUTE_NTH_ROOT",
    EvaluateDistributedNthRoot => "EVALUATE_DISTRIBUTED_NTH_ROOT",
    FactorIntoPrimes => "FACTOR_INTO_PRIMES",
    GroupTerms => "GROUP_TERMS",
    NthRootValue => "NTH_ROOT_VALUE",
    AddNthRoots => "ADD_NTH_ROOTS",
    MultiplyNthRoots => "MULTIPLY_NTH_ROOTS",

    // solving equations
    SimplifyLeftSide => "SIMPLIFY_LEFT_SIDE",
    SimplifyRightSide => "SIMPLIFY_RIGHT_SIDE",
    AddToBothSides => "ADD_TO_BOTH_SIDES",
    DivideFromBothSides => "DIVIDE_FROM_BOTH_SIDES",
    MultiplyBothSidesByInverseFraction => "MULTIPLY_BOTH_SIDES_BY_INVERSE_FRACTION",
    MultiplyBothSidesByNegativeOne => "MULTIPLY_BOTH_SIDES_BY_NEGATIVE_ONE",
    MultiplyToBothSides => "MULTIPLY_TO_BOTH_SIDES",
    SubtractFromBothSides => "SUBTRACT_FROM_BOTH_SIDES",
    SwapSides => "SWAP_SIDES",
    StatementIsTrue => "STATEMENT_IS_TRUE",
    StatementIsFalse => "STATEMENT_IS_FALSE",
    FindRoots => "FIND_ROOTS",

    // factoring
    FactorSymbol => "FACTOR_SYMBOL",
    FactorDifferenceOfSquares => "FACTOR_DIFFERENCE_OF_SQUARES",
    FactorPerfectSquare => "FACTOR_PERFECT_SQUARE",
    FactorSumProductRule => "FACTOR_SUM_PRODUCT_RULE",
    BreakUpTerm => "BREAK_UP_TERM",
}

impl ChangeType {
    /// Returns true if this is the [`ChangeType::NoChange`] sentinel.
    pub fn is_no_change(self) -> bool {
        self == ChangeType::NoChange
    }
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use std::collections::HashSet;
    use super::*;

    #[test]
    fn tags_are_verbatim() {
        assert_eq!(ChangeType::SimplifyArithmetic.as_str(), "SIMPLIFY_ARITHMETIC");
        assert_eq!(ChangeType::FactorSumProductRule.as_str(), "FACTOR_SUM_PRODUCT_RULE");
        assert_eq!(ChangeType::DivisionByZero.to_string(), "DIVISION_BY_ZERO");
    }

    #[test]
    fn tags_round_trip_and_are_unique() {
        let mut seen = HashSet::new();
        for &change in ChangeType::ALL {
            assert!(seen.insert(change.as_str()), "duplicate tag {}", change);
            assert_eq!(ChangeType::from_tag(change.as_str()), Some(change));
        }
        assert_eq!(ChangeType::from_tag("NOT_A_RULE"), None);
    }
}
