mod core_property_tests;
