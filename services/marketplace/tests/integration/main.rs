mod api_test;
mod equipment_test;
