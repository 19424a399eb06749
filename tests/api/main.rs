mod deliver_email;
