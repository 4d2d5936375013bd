mod tests_grow;
