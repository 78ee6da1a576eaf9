// Dotlanth
// Copyright (C) 2025 Synerthink

// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.

// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.

// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <http://www.gnu.org/licenses/>.


//! Errors raised while converting between documents and problems

use crate::document::SymbolKind;
use crate::parser::common::ParseError;
use ssp_core::ProblemError;
use thiserror::Error;

/// Errors that can occur during parsing, verification, loading or saving
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SspError {
    // Syntax Errors
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    // Structural Errors
    #[error("Invalid dependence record in {operation}: {details}")]
    InvalidDependence { operation: String, details: String },

    // Reference Errors
    #[error("Redefinition of symbol {name}")]
    DuplicateSymbol { name: String },

    #[error("Redefinition of value %{name}")]
    DuplicateValue { name: String },

    #[error("Use of undefined value %{name} in {operation}")]
    UndefinedValue { operation: String, name: String },

    #[error("Unknown referenced {expected} {name} in {context}")]
    UnknownReference { context: String, name: String, expected: SymbolKind },

    #[error("Reference {name} in {context} names an {found}, expected an {expected}")]
    WrongReferenceKind { context: String, name: String, expected: SymbolKind, found: SymbolKind },

    #[error("Name {name} is assigned to more than one operation")]
    DuplicateName { name: String },

    // Property Errors
    #[error("Unrecognized property {property} on {attachment}")]
    UnrecognizedProperty { attachment: String, property: String },

    // Model Errors
    #[error("{context}: {source}")]
    Model {
        context: String,
        #[source]
        source: ProblemError,
    },
}

impl SspError {
    /// Create a structural error for an operation's dependence list
    pub fn invalid_dependence(operation: impl Into<String>, details: impl Into<String>) -> Self {
        Self::InvalidDependence {
            operation: operation.into(),
            details: details.into(),
        }
    }

    /// Create an unknown reference error
    pub fn unknown_reference(context: impl Into<String>, name: impl Into<String>, expected: SymbolKind) -> Self {
        Self::UnknownReference {
            context: context.into(),
            name: name.into(),
            expected,
        }
    }

    /// Create an unrecognized property error
    pub fn unrecognized_property(attachment: impl Into<String>, property: impl ToString) -> Self {
        Self::UnrecognizedProperty {
            attachment: attachment.into(),
            property: property.to_string(),
        }
    }

    /// Wrap a rejection from the problem model with the offending entity
    pub fn model(context: impl Into<String>, source: ProblemError) -> Self {
        Self::Model {
            context: context.into(),
            source,
        }
    }

    /// Get the error category
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Parse(_) => ErrorCategory::Syntax,
            Self::InvalidDependence { .. } => ErrorCategory::Structural,
            Self::DuplicateSymbol { .. }
            | Self::DuplicateValue { .. }
            | Self::UndefinedValue { .. }
            | Self::UnknownReference { .. }
            | Self::WrongReferenceKind { .. }
            | Self::DuplicateName { .. } => ErrorCategory::Reference,
            Self::UnrecognizedProperty { .. } => ErrorCategory::Property,
            Self::Model { .. } => ErrorCategory::Model,
        }
    }
}

/// Error categories
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Syntax,
    Structural,
    Reference,
    Property,
    Model,
}

impl ErrorCategory {
    /// Get the category name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Syntax => "syntax",
            Self::Structural => "structural",
            Self::Reference => "reference",
            Self::Property => "property",
            Self::Model => "model",
        }
    }
}

/// Result type alias for document conversions
pub type SspResult<T> = Result<T, SspError>;
