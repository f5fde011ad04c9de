/// Field validators shared by the service layer
pub mod validation_tests;

/// CRUD round trips against a live database
pub mod crud_tests;
