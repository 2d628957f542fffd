mod sequential;
