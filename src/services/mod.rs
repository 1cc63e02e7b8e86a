pub mod activities_service;
pub mod activity_mapper;
pub mod validation;
