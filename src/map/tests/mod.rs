mod tests_scenarios;
